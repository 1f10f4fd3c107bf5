use async_trait::async_trait;
use storefront_persistence::customer::{
    addresses, addresses_of_type, create_customer_address, default_customer_address,
    delete_customer_address, save_customer_address, Address, AddressType, Customer,
    CustomerAddress, CustomerAddressService, Error,
};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Keeps addresses in memory and hands out sequential keys.
#[derive(Default)]
struct InMemoryAddresses {
    addresses: Mutex<Vec<CustomerAddress>>,
}

#[async_trait]
impl CustomerAddressService for InMemoryAddresses {
    async fn get_by_customer_key(&self, customer_key: Uuid) -> Result<Vec<CustomerAddress>, Error> {
        let addresses = self.addresses.lock().await;
        Ok(addresses
            .iter()
            .filter(|address| address.customer_key == customer_key)
            .cloned()
            .collect())
    }

    async fn get_by_customer_key_and_type(
        &self,
        customer_key: Uuid,
        address_type: AddressType,
    ) -> Result<Vec<CustomerAddress>, Error> {
        let addresses = self.addresses.lock().await;
        Ok(addresses
            .iter()
            .filter(|address| {
                address.customer_key == customer_key && address.address_type == address_type
            })
            .cloned()
            .collect())
    }

    async fn get_default(
        &self,
        customer_key: Uuid,
        address_type: AddressType,
    ) -> Result<Option<CustomerAddress>, Error> {
        Ok(self
            .get_by_customer_key_and_type(customer_key, address_type)
            .await?
            .into_iter()
            .find(|address| address.is_default))
    }

    async fn save(&self, mut address: CustomerAddress) -> Result<CustomerAddress, Error> {
        let mut addresses = self.addresses.lock().await;
        if address.key.is_nil() {
            address.key = Uuid::from_u128(addresses.len() as u128 + 1);
            addresses.push(address.clone());
        } else {
            let stored = addresses
                .iter_mut()
                .find(|stored| stored.key == address.key)
                .ok_or_else(|| Error::Service(format!("no address {}", address.key).into()))?;
            *stored = address.clone();
        }
        Ok(address)
    }

    async fn delete(&self, address: &CustomerAddress) -> Result<(), Error> {
        self.addresses
            .lock()
            .await
            .retain(|stored| stored.key != address.key);
        Ok(())
    }
}

fn customer(key: u128) -> Customer {
    Customer {
        key: Uuid::from_u128(key),
        email: format!("customer{key}@example.com"),
    }
}

fn address(name: &str) -> Address {
    Address {
        name: Some(name.to_string()),
        address1: Some("1 Main St".to_string()),
        locality: Some("Springfield".to_string()),
        country_code: Some("US".to_string()),
        ..Address::default()
    }
}

#[tokio::test]
async fn created_addresses_are_listed_per_customer_and_type() -> anyhow::Result<()> {
    tests_common::init_logging();
    let service = InMemoryAddresses::default();
    let ada = customer(100);
    let bob = customer(200);

    let shipping =
        create_customer_address(&service, &ada, address("Ada"), AddressType::Shipping).await?;
    create_customer_address(&service, &ada, address("Ada"), AddressType::Billing).await?;
    create_customer_address(&service, &bob, address("Bob"), AddressType::Shipping).await?;

    assert!(!shipping.key.is_nil());
    assert_eq!(shipping.customer_key, ada.key);
    assert_eq!(addresses(&service, &ada).await?.len(), 2);
    assert_eq!(
        addresses_of_type(&service, &ada, AddressType::Shipping).await?,
        vec![shipping]
    );
    Ok(())
}

#[tokio::test]
async fn the_default_address_is_found_after_saving() -> anyhow::Result<()> {
    let service = InMemoryAddresses::default();
    let ada = customer(100);

    let mut billing =
        create_customer_address(&service, &ada, address("Ada"), AddressType::Billing).await?;
    assert_eq!(
        default_customer_address(&service, &ada, AddressType::Billing).await?,
        None
    );

    billing.is_default = true;
    let billing = save_customer_address(&service, &ada, billing).await?;

    assert_eq!(
        default_customer_address(&service, &ada, AddressType::Billing).await?,
        Some(billing)
    );
    assert_eq!(
        default_customer_address(&service, &ada, AddressType::Shipping).await?,
        None
    );
    Ok(())
}

#[tokio::test]
async fn addresses_of_another_customer_are_not_saved() -> anyhow::Result<()> {
    let service = InMemoryAddresses::default();
    let ada = customer(100);
    let bob = customer(200);

    let mut stolen =
        create_customer_address(&service, &ada, address("Ada"), AddressType::Shipping).await?;
    stolen.full_name = Some("Bob".to_string());

    let err = save_customer_address(&service, &bob, stolen.clone())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::AddressNotOwned { address, owner, customer }
            if address == stolen.key && owner == ada.key && customer == bob.key
    ));
    assert_eq!(
        addresses(&service, &ada).await?[0].full_name.as_deref(),
        Some("Ada")
    );
    Ok(())
}

#[tokio::test]
async fn addresses_of_another_customer_are_not_deleted() -> anyhow::Result<()> {
    let service = InMemoryAddresses::default();
    let ada = customer(100);
    let bob = customer(200);

    let address =
        create_customer_address(&service, &ada, address("Ada"), AddressType::Shipping).await?;

    let err = delete_customer_address(&service, &bob, &address)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AddressNotOwned { .. }));
    assert_eq!(addresses(&service, &ada).await?.len(), 1);

    delete_customer_address(&service, &ada, &address).await?;
    assert!(addresses(&service, &ada).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn service_failures_are_passed_through() -> anyhow::Result<()> {
    let service = InMemoryAddresses::default();
    let ada = customer(100);

    let mut never_saved = CustomerAddress::from_address(&ada, address("Ada"), AddressType::Billing);
    never_saved.key = Uuid::from_u128(999);

    let err = save_customer_address(&service, &ada, never_saved)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "customer address service failed: no address 00000000-0000-0000-0000-0000000003e7"
    );
    Ok(())
}
