//! Build metadata embedded by `build.rs` for the `version` command.

macro_rules! build_env {
    ($key:literal) => {
        match option_env!(concat!("NEXUS_MANAGER_BUILD_", $key)) {
            Some(value) => value,
            None => "unknown",
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub const CURRENT: BuildMetadata = BuildMetadata {
    version: env!("CARGO_PKG_VERSION"),
    git_hash: build_env!("HASH"),
    git_status: build_env!("STATUS"),
    timestamp: build_env!("TIMESTAMP"),
    target: build_env!("TARGET"),
    profile: build_env!("PROFILE"),
    rustc: build_env!("RUSTC"),
};

impl BuildMetadata {
    /// `abc1234`, `abc1234+dirty`, or `unknown` outside a git checkout.
    pub fn revision(&self) -> String {
        match self.git_status {
            "dirty" => format!("{}+dirty", self.git_hash),
            _ => self.git_hash.to_string(),
        }
    }

    /// Label/value rows printed under the version banner.
    pub fn details(&self) -> [(&'static str, String); 5] {
        [
            ("Revision", self.revision()),
            ("Built at", self.timestamp.to_string()),
            ("Target", self.target.to_string()),
            ("Profile", self.profile.to_string()),
            ("Rustc", self.rustc.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_trees_are_marked_in_the_revision() {
        let meta = BuildMetadata {
            git_hash: "1a2b3c4",
            git_status: "dirty",
            ..CURRENT
        };
        assert_eq!(meta.revision(), "1a2b3c4+dirty");
        let clean = BuildMetadata {
            git_status: "clean",
            ..meta
        };
        assert_eq!(clean.revision(), "1a2b3c4");
        assert_eq!(CURRENT.version, env!("CARGO_PKG_VERSION"));
    }
}
