use mongodb::bson::spec::BinarySubtype;
use mongodb::bson::{Binary, Bson};
use uuid::Uuid;

/// A `Uuid` in the form the driver stores it.
///
/// Documents are written with bson's raw serializer, which is not
/// human-readable, so `Uuid` fields land as generic binary. Filters and
/// update payloads must use this form; `to_bson(&id)` yields a string that
/// matches nothing.
pub fn uuid_bson(id: Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}
