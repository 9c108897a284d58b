//! Serialized form of an imported class model.
//!
//! ```json
//! {
//!   "classes": [{
//!     "name": "com.example.shop.Cart",
//!     "supertypes": ["com.example.shop.Base"],
//!     "fields": [{ "name": "items", "type": "com.example.shop.Item" }],
//!     "methods": [{ "name": "add", "parameters": ["com.example.shop.Item"] }]
//!   }],
//!   "accesses": [{
//!     "kind": "method_call",
//!     "origin": "com.example.shop.Cart",
//!     "origin_member": "checkout()",
//!     "target": "com.example.billing.Payment",
//!     "target_member": "charge(long)",
//!     "line": 12
//!   }]
//! }
//! ```

use crate::domain::model::CallerKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub classes: Vec<ClassDocument>,
    #[serde(default)]
    pub accesses: Vec<AccessDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDocument {
    pub name: String,
    #[serde(default)]
    pub interface: bool,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
    #[serde(default)]
    pub methods: Vec<MethodDocument>,
    #[serde(default)]
    pub constructors: Vec<ConstructorDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDocument {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Absent for `void` methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorDocument {
    #[serde(default)]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    GetField,
    SetField,
    MethodCall,
    ConstructorCall,
    MemberReference,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDocument {
    pub kind: AccessKind,
    pub origin: String,
    /// Member of `origin` the access occurs in, without the owner prefix.
    pub origin_member: String,
    #[serde(default = "default_caller")]
    pub caller: CallerKind,
    pub target: String,
    /// Accessed member of `target`, without the owner prefix.
    pub target_member: String,
    #[serde(default)]
    pub line: u32,
}

fn default_caller() -> CallerKind {
    CallerKind::Method
}
