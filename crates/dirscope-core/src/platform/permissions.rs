/// Privilege checks.
///
/// Scanning never requires elevation, but without it some system folders
/// fail with access denied and drop out of the results. The check is a
/// capability so callers can warn up front: Windows asks the process token,
/// other platforms have no equivalent and always report "not elevated".

/// Reports whether the current process runs with elevated privileges.
pub trait PrivilegeCheck: Send + Sync {
    fn is_elevated(&self) -> bool;

    /// Whether the platform has an elevation concept at all. When it does
    /// not, callers should skip elevation warnings.
    fn is_supported(&self) -> bool {
        true
    }
}

/// For platforms without an elevation model.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrivilegeModel;

impl PrivilegeCheck for NoPrivilegeModel {
    fn is_elevated(&self) -> bool {
        false
    }

    fn is_supported(&self) -> bool {
        false
    }
}

/// Queries `TokenElevation` on the current process token.
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenElevationCheck;

#[cfg(windows)]
impl PrivilegeCheck for TokenElevationCheck {
    fn is_elevated(&self) -> bool {
        process_token::elevated().unwrap_or(false)
    }
}

#[cfg(windows)]
mod process_token {
    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::Security::{
        GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY,
    };
    use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

    /// Query handle on the current process token, closed on drop.
    struct Token(HANDLE);

    impl Token {
        fn open() -> windows::core::Result<Self> {
            let mut handle = HANDLE::default();
            // SAFETY: the pseudo handle from GetCurrentProcess needs no
            // closing and `handle` outlives the call.
            unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut handle)? };
            Ok(Self(handle))
        }

        fn elevation(&self) -> windows::core::Result<TOKEN_ELEVATION> {
            let mut elevation = TOKEN_ELEVATION::default();
            let mut written = 0u32;
            // SAFETY: the buffer is a TOKEN_ELEVATION and its size is passed
            // alongside it.
            unsafe {
                GetTokenInformation(
                    self.0,
                    TokenElevation,
                    Some(&mut elevation as *mut TOKEN_ELEVATION as *mut _),
                    std::mem::size_of::<TOKEN_ELEVATION>() as u32,
                    &mut written,
                )?
            };
            Ok(elevation)
        }
    }

    impl Drop for Token {
        fn drop(&mut self) {
            // SAFETY: the handle came from OpenProcessToken and is closed once.
            let _ = unsafe { CloseHandle(self.0) };
        }
    }

    /// `None` when the token cannot be opened or queried.
    pub(super) fn elevated() -> Option<bool> {
        let token = Token::open().ok()?;
        let elevation = token.elevation().ok()?;
        Some(elevation.TokenIsElevated != 0)
    }
}

/// The check appropriate for the current platform.
pub fn privilege_check() -> Box<dyn PrivilegeCheck> {
    #[cfg(windows)]
    {
        Box::new(TokenElevationCheck)
    }
    #[cfg(not(windows))]
    {
        Box::new(NoPrivilegeModel)
    }
}
