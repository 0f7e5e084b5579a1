//! Package descriptors handed to the Homebrew helper.
//!
//! These are built inline at each call site and never stored; the package
//! manager itself remains the source of truth for what is installed.

use std::fmt;

/// The two flavours of Homebrew package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Library-style package (`brew install --formula`).
    Formula,
    /// Application-style package (`brew install --cask`).
    Cask,
}

impl PackageKind {
    /// The brew flag selecting this kind on `list`, `install` and `upgrade`.
    pub fn brew_flag(self) -> &'static str {
        match self {
            PackageKind::Formula => "--formula",
            PackageKind::Cask => "--cask",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::Formula => write!(f, "formula"),
            PackageKind::Cask => write!(f, "cask"),
        }
    }
}

/// A `(name, kind)` tool descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageRef<'a> {
    pub name: &'a str,
    pub kind: PackageKind,
}

impl<'a> PackageRef<'a> {
    pub fn formula(name: &'a str) -> Self {
        PackageRef {
            name,
            kind: PackageKind::Formula,
        }
    }

    pub fn cask(name: &'a str) -> Self {
        PackageRef {
            name,
            kind: PackageKind::Cask,
        }
    }
}

impl fmt::Display for PackageRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
