use crate::artifacts::core::{StoreError, StoreResult};
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::codec;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::{ObjectId, is_hex};
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Content-addressed object store rooted at `<git dir>/objects`
///
/// Objects are written once and never rewritten; there is no in-memory cache,
/// so every read goes back to disk.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    /// Frame, compress and persist a payload, returning its id.
    ///
    /// If a file already exists at the object's path the write is skipped.
    pub fn put(&self, object_type: ObjectType, payload: &[u8]) -> StoreResult<ObjectId> {
        let encoded = codec::encode(object_type, payload);
        let object_path = self.object_path(&encoded.oid);

        if object_path.exists() {
            tracing::debug!(oid = %encoded.oid, kind = %object_type, "object already stored");
            return Ok(encoded.oid);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| StoreError::InvalidObjectId {
                value: encoded.oid.to_string(),
            })?;
        std::fs::create_dir_all(object_dir)
            .map_err(|e| StoreError::io("create object directory", object_dir, e))?;

        self.write_object(&object_path, &encoded.framed)?;
        tracing::debug!(oid = %encoded.oid, kind = %object_type, "stored object");

        Ok(encoded.oid)
    }

    pub fn store(&self, object: &impl Object) -> StoreResult<ObjectId> {
        self.put(object.object_type(), &object.serialize()?)
    }

    /// Load an object and return its kind and payload.
    pub fn get(&self, object_id: &ObjectId) -> StoreResult<(ObjectType, Bytes)> {
        let object_path = self.object_path(object_id);
        let framed = self.read_object(object_id, &object_path)?;
        tracing::trace!(oid = %object_id, "loaded object");

        codec::decode(&framed).map_err(|e| e.at(&object_path))
    }

    /// Read only the header of an object.
    pub fn read_header(&self, object_id: &ObjectId) -> StoreResult<ObjectType> {
        let object_path = self.object_path(object_id);
        let file = std::fs::File::open(&object_path)
            .map_err(|e| Self::open_error(object_id, &object_path, e))?;

        let (object_type, _) = codec::read_header(file).map_err(|e| e.at(&object_path))?;
        Ok(object_type)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> StoreResult<ObjectBox> {
        let (object_type, payload) = self.get(object_id)?;

        ObjectBox::parse(object_type, payload).map_err(|e| e.at(&self.object_path(object_id)))
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> StoreResult<Option<Tree>> {
        match self.get(object_id)? {
            (ObjectType::Tree, payload) => Tree::deserialize(payload)
                .map(Some)
                .map_err(|e| e.at(&self.object_path(object_id))),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> StoreResult<Option<Commit>> {
        match self.get(object_id)? {
            (ObjectType::Commit, payload) => Commit::deserialize(payload)
                .map(Some)
                .map_err(|e| e.at(&self.object_path(object_id))),
            _ => Ok(None),
        }
    }

    /// Resolve an abbreviated id to the single stored object it names.
    ///
    /// Prefixes of two or more characters only look inside their fan-out
    /// directory; a one-character prefix scans every fan-out directory.
    pub fn resolve_prefix(&self, prefix: &str) -> StoreResult<ObjectId> {
        if prefix.is_empty() || prefix.len() > OBJECT_ID_LENGTH || !is_hex(prefix) {
            return Err(StoreError::InvalidObjectId {
                value: prefix.to_string(),
            });
        }
        let prefix = prefix.to_ascii_lowercase();

        let mut matches = self.find_objects_by_prefix(&prefix)?;
        match matches.len() {
            0 => {
                let searched = if prefix.len() >= 2 {
                    self.path.join(&prefix[..2])
                } else {
                    self.path.to_path_buf()
                };
                Err(StoreError::ObjectNotFound {
                    id: prefix,
                    path: searched,
                })
            }
            1 => Ok(matches.remove(0)),
            _ => Err(StoreError::AmbiguousPrefix {
                prefix,
                candidates: matches,
            }),
        }
    }

    /// Find all objects whose OID starts with the given lower-case prefix.
    ///
    /// Returns an empty vector when nothing matches; more than one match means
    /// the prefix is ambiguous.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> StoreResult<Vec<ObjectId>> {
        let dir_names = if prefix.len() >= 2 {
            let dir_name = prefix[..2].to_string();
            if self.path.join(&dir_name).is_dir() {
                vec![dir_name]
            } else {
                vec![]
            }
        } else {
            self.fan_out_dirs()?
        };

        let mut matches = Vec::new();
        for dir_name in dir_names {
            matches.extend(
                self.ids_in_fan_out_dir(&dir_name)?
                    .into_iter()
                    .filter(|oid| oid.as_ref().starts_with(prefix)),
            );
        }

        Ok(matches)
    }

    /// Every stored object id, ordered by fan-out directory then file name.
    ///
    /// Directories that are not two hex characters (`info`, `pack`) and files
    /// that do not complete a 40-character id are skipped.
    pub fn list_ids(&self) -> StoreResult<Vec<ObjectId>> {
        let mut ids = Vec::new();
        for dir_name in self.fan_out_dirs()? {
            ids.extend(self.ids_in_fan_out_dir(&dir_name)?);
        }

        Ok(ids)
    }

    /// Every stored object with the kind read from its header.
    pub fn list_all(&self) -> StoreResult<Vec<DatabaseEntry>> {
        self.list_ids()?
            .into_iter()
            .map(|oid| {
                let object_type = self.read_header(&oid)?;
                Ok(DatabaseEntry::new(oid, object_type))
            })
            .collect()
    }

    fn fan_out_dirs(&self) -> StoreResult<Vec<String>> {
        let mut dir_names = std::fs::read_dir(&self.path)
            .map_err(|e| StoreError::io("read object directory", &self.path, e))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.len() == 2 && is_hex(name))
            .collect::<Vec<_>>();
        dir_names.sort();

        Ok(dir_names)
    }

    fn ids_in_fan_out_dir(&self, dir_name: &str) -> StoreResult<Vec<ObjectId>> {
        let dir_path = self.path.join(dir_name);
        let mut ids = std::fs::read_dir(&dir_path)
            .map_err(|e| StoreError::io("read object directory", &dir_path, e))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter_map(|file_name| ObjectId::try_parse(format!("{dir_name}{file_name}")).ok())
            .collect::<Vec<_>>();
        ids.sort();

        Ok(ids)
    }

    fn read_object(&self, object_id: &ObjectId, object_path: &Path) -> StoreResult<Bytes> {
        let object_content = std::fs::read(object_path)
            .map_err(|e| Self::open_error(object_id, object_path, e))?;

        codec::decompress(&object_content).map_err(|e| e.at(object_path))
    }

    fn write_object(&self, object_path: &Path, framed: &[u8]) -> StoreResult<()> {
        let object_dir = object_path.parent().unwrap_or(&self.path);
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = codec::compress(framed)
            .map_err(|e| StoreError::io("compress object", object_path, e))?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .map_err(|e| StoreError::io("open object file", &temp_object_path, e))?;

        let persisted = file
            .write_all(&object_content)
            .map_err(|e| StoreError::io("write object file", &temp_object_path, e))
            .and_then(|()| {
                // rename the temp file to the object file to make it atomic
                std::fs::rename(&temp_object_path, object_path)
                    .map_err(|e| StoreError::io("rename object file to", object_path, e))
            });

        if persisted.is_err()
            && let Err(e) = std::fs::remove_file(&temp_object_path)
        {
            tracing::warn!(path = %temp_object_path.display(), error = %e, "failed to remove temp object file");
        }

        persisted
    }

    fn open_error(object_id: &ObjectId, object_path: &Path, error: std::io::Error) -> StoreError {
        if error.kind() == std::io::ErrorKind::NotFound {
            StoreError::ObjectNotFound {
                id: object_id.to_string(),
                path: object_path.to_path_buf(),
            }
        } else {
            StoreError::io("read object file", object_path, error)
        }
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
