use crate::artifacts::core::StoreResult;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::codec::{self, EncodedObject};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;

/// Serialize an object's payload (without the `<kind> <len>\0` header).
pub trait Packable {
    fn serialize(&self) -> StoreResult<Bytes>;
}

/// Rebuild an object from a payload whose header has already been stripped.
pub trait Unpackable {
    fn deserialize(payload: Bytes) -> StoreResult<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn encode(&self) -> StoreResult<EncodedObject> {
        Ok(codec::encode(self.object_type(), &self.serialize()?))
    }

    fn object_id(&self) -> StoreResult<ObjectId> {
        Ok(self.encode()?.oid)
    }
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn parse(object_type: ObjectType, payload: Bytes) -> StoreResult<Self> {
        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(payload)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(payload)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                payload,
            )?))),
        }
    }
}
