mod digest;
mod manifest;
mod repository;
mod repository_name;
mod tag;

pub use self::digest::Digest;
pub use self::manifest::{
    Architecture, MANIFEST_LIST_V2, Manifest, ManifestList, ManifestPayload, Platform,
};
pub use self::repository::{Repository, RepositoryRecord};
pub use self::repository_name::RepositoryName;
pub use self::tag::{Tag, TagRecord};
