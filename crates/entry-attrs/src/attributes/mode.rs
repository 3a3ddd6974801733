//! Portable file mode bits.
//!
//! Platforms disagree on where the file type lives inside `st_mode`, so
//! [`FileMode`] uses its own layout: the low nine bits are the usual
//! `rwxrwxrwx` permissions and the high bits are one flag per file type or
//! special attribute. The [`Display`](std::fmt::Display) form (`drwxr-xr-x`)
//! is the only representation meant for humans; [`FileMode::bits`] is the
//! one meant for transport.

use std::fmt;

/// Permission and type bits for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileMode(u32);

impl FileMode {
    pub const DIR: u32 = 1 << 31;
    pub const APPEND: u32 = 1 << 30;
    pub const EXCLUSIVE: u32 = 1 << 29;
    pub const TEMPORARY: u32 = 1 << 28;
    pub const SYMLINK: u32 = 1 << 27;
    pub const DEVICE: u32 = 1 << 26;
    pub const NAMED_PIPE: u32 = 1 << 25;
    pub const SOCKET: u32 = 1 << 24;
    pub const SETUID: u32 = 1 << 23;
    pub const SETGID: u32 = 1 << 22;
    pub const CHAR_DEVICE: u32 = 1 << 21;
    pub const STICKY: u32 = 1 << 20;
    pub const IRREGULAR: u32 = 1 << 19;

    /// Bits that describe what kind of entry this is.
    pub const TYPE_MASK: u32 = Self::DIR
        | Self::SYMLINK
        | Self::NAMED_PIPE
        | Self::SOCKET
        | Self::DEVICE
        | Self::CHAR_DEVICE
        | Self::IRREGULAR;

    pub const PERM_MASK: u32 = 0o777;

    // Display order matters: each flag bit, from bit 31 down, maps to one char.
    const FLAG_CHARS: &'static [u8; 13] = b"dalTLDpSugct?";

    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Converts a raw POSIX `st_mode` into the portable layout.
    ///
    /// Type bits outside the known `S_IFMT` values are reported as
    /// [`FileMode::IRREGULAR`].
    pub fn from_unix(st_mode: u32) -> Self {
        const S_IFMT: u32 = 0o170000;
        const S_IFSOCK: u32 = 0o140000;
        const S_IFLNK: u32 = 0o120000;
        const S_IFREG: u32 = 0o100000;
        const S_IFBLK: u32 = 0o060000;
        const S_IFDIR: u32 = 0o040000;
        const S_IFCHR: u32 = 0o020000;
        const S_IFIFO: u32 = 0o010000;
        const S_ISUID: u32 = 0o4000;
        const S_ISGID: u32 = 0o2000;
        const S_ISVTX: u32 = 0o1000;

        let mut bits = st_mode & Self::PERM_MASK;
        bits |= match st_mode & S_IFMT {
            0 | S_IFREG => 0,
            S_IFDIR => Self::DIR,
            S_IFLNK => Self::SYMLINK,
            S_IFBLK => Self::DEVICE,
            S_IFCHR => Self::DEVICE | Self::CHAR_DEVICE,
            S_IFIFO => Self::NAMED_PIPE,
            S_IFSOCK => Self::SOCKET,
            _ => Self::IRREGULAR,
        };
        if st_mode & S_ISUID != 0 {
            bits |= Self::SETUID;
        }
        if st_mode & S_ISGID != 0 {
            bits |= Self::SETGID;
        }
        if st_mode & S_ISVTX != 0 {
            bits |= Self::STICKY;
        }
        Self(bits)
    }

    /// The `rwxrwxrwx` permission bits.
    pub fn perm(self) -> u32 {
        self.0 & Self::PERM_MASK
    }

    /// The type bits, with permissions and special flags cleared.
    pub fn file_type(self) -> u32 {
        self.0 & Self::TYPE_MASK
    }

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    pub fn is_dir(self) -> bool {
        self.contains(Self::DIR)
    }

    pub fn is_symlink(self) -> bool {
        self.contains(Self::SYMLINK)
    }

    /// True when no type bit is set.
    pub fn is_regular(self) -> bool {
        self.file_type() == 0
    }
}

impl From<u32> for FileMode {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<FileMode> for u32 {
    fn from(mode: FileMode) -> Self {
        mode.0
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(22);
        for (i, c) in Self::FLAG_CHARS.iter().enumerate() {
            if self.0 & (1 << (31 - i)) != 0 {
                out.push(*c as char);
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        const RWX: &[u8; 9] = b"rwxrwxrwx";
        for (i, c) in RWX.iter().enumerate() {
            if self.0 & (1 << (8 - i)) != 0 {
                out.push(*c as char);
            } else {
                out.push('-');
            }
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_file_permissions() {
        assert_eq!(FileMode::new(0o755).to_string(), "-rwxr-xr-x");
        assert_eq!(FileMode::new(0o644).to_string(), "-rw-r--r--");
        assert_eq!(FileMode::new(0).to_string(), "----------");
    }

    #[test]
    fn type_flags_precede_permissions() {
        let dir = FileMode::new(FileMode::DIR | 0o755);
        assert_eq!(dir.to_string(), "drwxr-xr-x");

        let link = FileMode::new(FileMode::SYMLINK | 0o777);
        assert_eq!(link.to_string(), "Lrwxrwxrwx");

        let tty = FileMode::new(FileMode::DEVICE | FileMode::CHAR_DEVICE | 0o620);
        assert_eq!(tty.to_string(), "Dcrw--w----");
    }

    #[test]
    fn from_unix_maps_type_bits() {
        assert_eq!(FileMode::from_unix(0o040755).to_string(), "drwxr-xr-x");
        assert_eq!(FileMode::from_unix(0o100644).to_string(), "-rw-r--r--");
        assert_eq!(FileMode::from_unix(0o120777).to_string(), "Lrwxrwxrwx");
        assert_eq!(FileMode::from_unix(0o010600).to_string(), "prw-------");
        assert_eq!(FileMode::from_unix(0o140755).to_string(), "Srwxr-xr-x");
    }

    #[test]
    fn from_unix_maps_special_bits() {
        let sticky_tmp = FileMode::from_unix(0o041777);
        assert!(sticky_tmp.is_dir());
        assert!(sticky_tmp.contains(FileMode::STICKY));
        assert_eq!(sticky_tmp.to_string(), "dtrwxrwxrwx");

        let suid = FileMode::from_unix(0o104755);
        assert!(suid.contains(FileMode::SETUID));
        assert!(suid.is_regular());
        assert_eq!(suid.perm(), 0o755);
    }

    #[test]
    fn accessors() {
        let mode = FileMode::new(FileMode::DIR | FileMode::SETGID | 0o750);
        assert!(mode.is_dir());
        assert!(!mode.is_symlink());
        assert!(!mode.is_regular());
        assert_eq!(mode.perm(), 0o750);
        assert_eq!(mode.file_type(), FileMode::DIR);
        assert_eq!(u32::from(mode), FileMode::DIR | FileMode::SETGID | 0o750);
    }
}
