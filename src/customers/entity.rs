use serde::{Deserialize, Serialize};

/// A stored customer. `id` is assigned by the database and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub contacted: bool,
}

/// Create payload. Absent fields take their zero value; an `id` in the body is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewCustomer {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub contacted: bool,
}

impl NewCustomer {
    pub fn with_id(self, id: i64) -> Customer {
        Customer {
            id,
            name: self.name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            contacted: self.contacted,
        }
    }
}

/// Field-level overrides for PATCH. `None` (absent or `null`) leaves the field as it was.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contacted: Option<bool>,
}

impl CustomerPatch {
    /// Overwrite the provided fields on `customer`. The id is untouched.
    pub fn apply(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(role) = self.role {
            customer.role = role;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
        if let Some(contacted) = self.contacted {
            customer.contacted = contacted;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &CustomerPatch::default()
    }
}
