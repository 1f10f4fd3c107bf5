//! Customers and their addresses.
//!
//! The address functions forward to a [`CustomerAddressService`] passed in by
//! the caller, after checking that the address belongs to the customer.

use async_trait::async_trait;
use query_engine_expression::expression::{EnumValue, Operator, OrderDirection};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::Entity;
use crate::factory::QueryFactory;
use crate::query::{Query, QueryError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub key: Uuid,
    pub email: String,
}

impl Entity for Customer {
    const NAME: &'static str = "Customer";
}

/// The purpose of a customer address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    Shipping = 1,
    Billing = 2,
}

impl AddressType {
    fn name(self) -> &'static str {
        match self {
            AddressType::Shipping => "Shipping",
            AddressType::Billing => "Billing",
        }
    }
}

impl From<AddressType> for EnumValue {
    fn from(address_type: AddressType) -> Self {
        EnumValue::new("AddressType", address_type.name(), address_type as i64)
    }
}

/// A postal address not yet associated with a customer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
}

/// An address owned by a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerAddress {
    /// `Uuid::nil()` until the address has been saved.
    pub key: Uuid,
    pub customer_key: Uuid,
    pub address_type: AddressType,
    pub is_default: bool,
    pub full_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
}

impl Entity for CustomerAddress {
    const NAME: &'static str = "CustomerAddress";
}

impl CustomerAddress {
    /// A new, unsaved address of `customer`.
    pub fn from_address(customer: &Customer, address: Address, address_type: AddressType) -> Self {
        CustomerAddress {
            key: Uuid::nil(),
            customer_key: customer.key,
            address_type,
            is_default: false,
            full_name: address.name,
            address1: address.address1,
            address2: address.address2,
            locality: address.locality,
            region: address.region,
            postal_code: address.postal_code,
            country_code: address.country_code,
            phone: address.phone,
        }
    }
}

/// Customer address failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("address {address} belongs to customer {owner}, not to customer {customer}")]
    AddressNotOwned {
        address: Uuid,
        owner: Uuid,
        customer: Uuid,
    },
    #[error("customer address service failed: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Storage of customer addresses.
#[async_trait]
pub trait CustomerAddressService: Send + Sync {
    async fn get_by_customer_key(&self, customer_key: Uuid) -> Result<Vec<CustomerAddress>, Error>;

    async fn get_by_customer_key_and_type(
        &self,
        customer_key: Uuid,
        address_type: AddressType,
    ) -> Result<Vec<CustomerAddress>, Error>;

    async fn get_default(
        &self,
        customer_key: Uuid,
        address_type: AddressType,
    ) -> Result<Option<CustomerAddress>, Error>;

    /// Store the address and return it as stored.
    async fn save(&self, address: CustomerAddress) -> Result<CustomerAddress, Error>;

    async fn delete(&self, address: &CustomerAddress) -> Result<(), Error>;
}

/// All addresses of a customer.
pub async fn addresses(
    service: &dyn CustomerAddressService,
    customer: &Customer,
) -> Result<Vec<CustomerAddress>, Error> {
    service.get_by_customer_key(customer.key).await
}

/// The addresses of a customer with the given purpose.
pub async fn addresses_of_type(
    service: &dyn CustomerAddressService,
    customer: &Customer,
    address_type: AddressType,
) -> Result<Vec<CustomerAddress>, Error> {
    service
        .get_by_customer_key_and_type(customer.key, address_type)
        .await
}

/// The default address of a customer for the given purpose, if any.
pub async fn default_customer_address(
    service: &dyn CustomerAddressService,
    customer: &Customer,
    address_type: AddressType,
) -> Result<Option<CustomerAddress>, Error> {
    service.get_default(customer.key, address_type).await
}

/// Attach an address to a customer and save it.
pub async fn create_customer_address(
    service: &dyn CustomerAddressService,
    customer: &Customer,
    address: Address,
    address_type: AddressType,
) -> Result<CustomerAddress, Error> {
    let customer_address = CustomerAddress::from_address(customer, address, address_type);
    save_customer_address(service, customer, customer_address).await
}

/// Save an address of the customer.
pub async fn save_customer_address(
    service: &dyn CustomerAddressService,
    customer: &Customer,
    address: CustomerAddress,
) -> Result<CustomerAddress, Error> {
    ensure_owned(customer, &address)?;
    service.save(address).await
}

/// Delete an address of the customer.
pub async fn delete_customer_address(
    service: &dyn CustomerAddressService,
    customer: &Customer,
    address: &CustomerAddress,
) -> Result<(), Error> {
    ensure_owned(customer, address)?;
    service.delete(address).await
}

fn ensure_owned(customer: &Customer, address: &CustomerAddress) -> Result<(), Error> {
    if address.customer_key == customer.key {
        Ok(())
    } else {
        tracing::warn!(
            customer = %customer.key,
            owner = %address.customer_key,
            "refusing to change an address of another customer"
        );
        Err(Error::AddressNotOwned {
            address: address.key,
            owner: address.customer_key,
            customer: customer.key,
        })
    }
}

/// The query a repository runs to list the addresses of a customer,
/// optionally restricted to one purpose. Default addresses come first.
pub fn customer_addresses_query(
    factory: &QueryFactory,
    customer_key: Uuid,
    address_type: Option<AddressType>,
) -> Result<Query<CustomerAddress>, QueryError> {
    let query = factory
        .create::<CustomerAddress>()
        .where_("customerKey", Operator::Equals, customer_key)?;
    let query = match address_type {
        Some(address_type) => {
            query.where_("addressType", Operator::Equals, EnumValue::from(address_type))?
        }
        None => query,
    };
    Ok(query.order_by("isDefault", OrderDirection::Descending))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_types_keep_their_discriminants() {
        assert_eq!(
            EnumValue::from(AddressType::Shipping),
            EnumValue::new("AddressType", "Shipping", 1)
        );
        assert_eq!(EnumValue::from(AddressType::Billing).discriminant, 2);
    }

    #[test]
    fn new_addresses_belong_to_the_customer() {
        let customer = Customer {
            key: Uuid::from_u128(7),
            email: "a@b.com".to_string(),
        };
        let address = CustomerAddress::from_address(
            &customer,
            Address {
                name: Some("Ada".to_string()),
                ..Address::default()
            },
            AddressType::Billing,
        );
        assert_eq!(address.customer_key, customer.key);
        assert_eq!(address.key, Uuid::nil());
        assert_eq!(address.full_name.as_deref(), Some("Ada"));
        assert!(!address.is_default);
    }
}
