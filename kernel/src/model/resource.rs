use crate::model::id::ResourceId;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Resource {
    pub resource_id: ResourceId,
    pub name: String,
}
