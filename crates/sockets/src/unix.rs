//! Unix-domain ("local") listeners.
//!
//! Each token names one socket file inside the socket directory. An
//! existing file at that path is treated as a naming collision and left
//! alone, so the registry moves on to the next token.
//!
//! The socket directory must be a real directory owned by the effective
//! uid and not writable by group or others. Anything else is refused.

use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::{DirBuilderExt, MetadataExt, PermissionsExt};
use std::os::unix::io::AsRawFd;
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};

use bootstrap::{SessionToken, TransportBindError, TransportError, TransportHandle, TransportKind};
use tracing::{debug, warn};

/// A listening Unix-domain socket.
#[derive(Debug)]
pub struct UnixTransport {
    listener: Option<UnixListener>,
    path: PathBuf,
    network_id: Option<String>,
}

impl UnixTransport {
    /// Bind `<dir>/<token>`, creating `dir` (mode 0700) if needed.
    ///
    /// `hostname` is `None` when the host name could not be determined; the
    /// socket is still bound but has no network id.
    pub fn bind(
        dir: &Path,
        token: &SessionToken,
        hostname: Option<&str>,
    ) -> Result<Self, TransportBindError> {
        let path = dir.join(token.as_str());
        let Some(advertised) = path.to_str() else {
            return Err(bind_error(format!("{} is not valid UTF-8", path.display())));
        };
        ensure_socket_dir(dir)
            .map_err(|err| bind_error(format!("socket dir {}: {err}", dir.display())))?;

        if fs::symlink_metadata(&path).is_ok() {
            return Err(bind_error(format!("{advertised} already exists")));
        }

        let listener =
            UnixListener::bind(&path).map_err(|err| bind_error(format!("{advertised}: {err}")))?;
        let network_id = hostname.map(|host| format!("local/{host}:{advertised}"));
        debug!(path = %path.display(), "local listener bound");

        Ok(Self {
            listener: Some(listener),
            path,
            network_id,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying listener while open.
    pub fn listener(&self) -> Option<&UnixListener> {
        self.listener.as_ref()
    }
}

impl TransportHandle for UnixTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Local
    }

    fn connection_number(&self) -> Option<i32> {
        self.listener.as_ref().map(|listener| listener.as_raw_fd())
    }

    fn network_id(&self) -> Option<String> {
        self.listener.as_ref().and(self.network_id.clone())
    }

    /// Close the socket and remove its file.
    fn close(&mut self) -> Result<(), TransportError> {
        if self.listener.take().is_none() {
            return Ok(());
        }
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TransportError::Io {
                kind: TransportKind::Local,
                source,
            }),
        }
    }
}

impl Drop for UnixTransport {
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            warn!(path = %self.path.display(), %error, "failed to remove local socket");
        }
    }
}

fn bind_error(reason: String) -> TransportBindError {
    TransportBindError::new(TransportKind::Local, reason)
}

fn ensure_socket_dir(dir: &Path) -> io::Result<()> {
    match fs::symlink_metadata(dir) {
        Ok(meta) => check_private_dir(&meta),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            DirBuilder::new().recursive(true).mode(0o700).create(dir)?;
            // Someone else may have created it first.
            check_private_dir(&fs::symlink_metadata(dir)?)?;
            // Mode is masked by umask on creation.
            fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
        }
        Err(err) => Err(err),
    }
}

fn check_private_dir(meta: &fs::Metadata) -> io::Result<()> {
    if meta.file_type().is_symlink() {
        return Err(io::Error::new(io::ErrorKind::PermissionDenied, "is a symlink"));
    }
    if !meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "exists and is not a directory",
        ));
    }
    // SAFETY: geteuid has no preconditions and cannot fail.
    let euid = unsafe { libc::geteuid() };
    if meta.uid() != euid {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("owned by uid {}, not {euid}", meta.uid()),
        ));
    }
    if meta.mode() & 0o022 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("mode {:o} is writable by group or others", meta.mode() & 0o777),
        ));
    }
    Ok(())
}
