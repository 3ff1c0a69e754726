use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

/// A REST resource managed through the generic CRUD service and controller.
///
/// Implementors are zero-sized markers; the associated types carry the data.
pub trait Resource: Send + Sync + 'static {
    /// Row as returned by list and detail endpoints
    type Item: DeserializeOwned + Serialize + Clone + Debug + Send + Sync + 'static;
    /// Body of `POST <endpoint>/create`
    type Create: Serialize + DeserializeOwned + Validate + Debug + Send + Sync + 'static;
    /// Body of `PUT <endpoint>/:id`
    type Update: Serialize + DeserializeOwned + Validate + Debug + Send + Sync + 'static;

    /// Path segment, e.g. `island` for `island/get`
    const ENDPOINT: &'static str;
    /// Human-readable singular, e.g. `island`
    const LABEL: &'static str;

    fn id(item: &Self::Item) -> &str;

    /// Display name used for duplicate detection, `None` for unnamed resources
    fn name(_item: &Self::Item) -> Option<&str> {
        None
    }

    fn create_name(_dto: &Self::Create) -> Option<&str> {
        None
    }

    fn update_name(_dto: &Self::Update) -> Option<&str> {
        None
    }

    fn duplicate_message() -> String {
        format!("A {} with this name already exists", Self::LABEL)
    }
}
