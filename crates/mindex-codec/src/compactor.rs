use mindex_record::{keys, Record, RecordType};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CodecError, CodecResult};
use crate::fields::{self, flag, join_fields, join_list, nvl, put_if_present, FIELD_SEPARATOR};
use crate::EncodedRecord;

/// Options for [`RecordCompactor`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactorConfig {
    /// Reject artifact records lacking group id, artifact id or version
    /// instead of emitting a UINFO with empty identity segments.
    pub validate_identity: bool,
}

/// Compacts [`Record`]s into the chunk-native string maps.
#[derive(Clone, Debug, Default)]
pub struct RecordCompactor {
    config: CompactorConfig,
}

impl RecordCompactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompactorConfig) -> Self {
        Self { config }
    }

    /// A compactor that validates artifact identity before encoding.
    pub fn strict() -> Self {
        Self::with_config(CompactorConfig {
            validate_identity: true,
        })
    }

    pub fn config(&self) -> &CompactorConfig {
        &self.config
    }

    /// Compact one record.
    ///
    /// Only fails in strict mode, and then before producing any output.
    pub fn compact(&self, record: &Record) -> CodecResult<EncodedRecord> {
        if self.config.validate_identity {
            let missing = record.missing_identity();
            if !missing.is_empty() {
                return Err(CodecError::MissingIdentity {
                    record_type: record.record_type(),
                    missing,
                });
            }
        }
        Ok(compact(record))
    }
}

/// Compact a record with all encoded fields as physically present in an
/// index chunk.
pub fn compact(record: &Record) -> EncodedRecord {
    trace!(record_type = %record.record_type(), fields = record.len(), "compacting record");
    match record.record_type() {
        RecordType::Descriptor => compact_descriptor(record),
        RecordType::AllGroups => compact_all_groups(record),
        RecordType::RootGroups => compact_root_groups(record),
        RecordType::ArtifactRemove => compact_deleted_artifact(record),
        RecordType::ArtifactAdd => compact_added_artifact(record),
    }
}

fn compact_descriptor(record: &Record) -> EncodedRecord {
    let mut result = EncodedRecord::new();
    result.insert(fields::DESCRIPTOR.into(), fields::DESCRIPTOR_MARKER.into());
    result.insert(
        fields::IDXINFO.into(),
        join_fields(&[fields::INDEX_VERSION, nvl(record.get(&keys::REPOSITORY_ID))]),
    );
    result
}

fn compact_all_groups(record: &Record) -> EncodedRecord {
    let mut result = EncodedRecord::new();
    result.insert(fields::ALL_GROUPS.into(), fields::GROUPS_MARKER.into());
    put_if_present(
        &mut result,
        fields::ALL_GROUPS_LIST,
        record.get(&keys::ALL_GROUPS),
        |groups| join_list(groups),
    );
    result
}

fn compact_root_groups(record: &Record) -> EncodedRecord {
    let mut result = EncodedRecord::new();
    result.insert(fields::ROOT_GROUPS.into(), fields::GROUPS_MARKER.into());
    put_if_present(
        &mut result,
        fields::ROOT_GROUPS_LIST,
        record.get(&keys::ROOT_GROUPS),
        |groups| join_list(groups),
    );
    result
}

fn compact_deleted_artifact(record: &Record) -> EncodedRecord {
    let mut result = EncodedRecord::new();
    put_modified(&mut result, record);
    result.insert(fields::DELETED.into(), compact_uinfo(record));
    result
}

fn compact_added_artifact(record: &Record) -> EncodedRecord {
    let mut result = EncodedRecord::new();

    result.insert(fields::UINFO.into(), compact_uinfo(record));
    result.insert(fields::INFO.into(), compact_info(record));
    put_modified(&mut result, record);

    for (name, key) in fields::STRING_FIELDS {
        put_if_present(&mut result, name, record.get(key), |v| Some(v.clone()));
    }
    for (name, key) in fields::LIST_FIELDS {
        put_if_present(&mut result, name, record.get(key), |items| join_list(items));
    }

    result
}

fn put_modified(target: &mut EncodedRecord, record: &Record) {
    put_if_present(target, fields::MODIFIED, record.get(&keys::REC_MODIFIED), |ts| {
        Some(ts.to_string())
    });
}

/// The UINFO composite. A set classifier adds a fifth segment carrying the
/// file extension, so the segment count tells readers whether one applies.
pub(crate) fn compact_uinfo(record: &Record) -> String {
    let classifier = record.get(&keys::CLASSIFIER);
    let mut uinfo = join_fields(&[
        nvl(record.get(&keys::GROUP_ID)),
        nvl(record.get(&keys::ARTIFACT_ID)),
        nvl(record.get(&keys::VERSION)),
        nvl(classifier),
    ]);
    if classifier.is_some() {
        uinfo.push(FIELD_SEPARATOR);
        uinfo.push_str(nvl(record.get(&keys::FILE_EXTENSION)));
    }
    uinfo
}

/// The INFO composite: always seven segments.
pub(crate) fn compact_info(record: &Record) -> String {
    let number = |value: Option<&i64>| value.map(i64::to_string).unwrap_or_default();
    join_fields(&[
        nvl(record.get(&keys::PACKAGING)).to_string(),
        number(record.get(&keys::FILE_MODIFIED)),
        number(record.get(&keys::FILE_SIZE)),
        flag(record.get(&keys::HAS_SOURCES)).to_string(),
        flag(record.get(&keys::HAS_JAVADOC)).to_string(),
        flag(record.get(&keys::HAS_SIGNATURE)).to_string(),
        nvl(record.get(&keys::FILE_EXTENSION)).to_string(),
    ])
}
