use serde::Deserialize;

/// Storage-change notification envelope delivered to the tagger.
///
/// An envelope with no `Records` entry is valid and produces no work.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StorageRecord>,
}

/// One record of a storage event
#[derive(Debug, Clone, Deserialize)]
pub struct StorageRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

/// Object reference as carried on the wire; the key is percent-encoded
#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
    #[serde(rename = "versionId", default)]
    pub version_id: Option<String>,
}
