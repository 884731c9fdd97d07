//! Datos de prueba compartidos por los servicios y las rutas

use uuid::Uuid;

use crate::dto::{DriverRequest, OwnerRequest, VehicleRequest};
use crate::models::{Driver, Owner, RequestContext, VehicleClass, VehicleDetail};
use crate::repositories::memory::MemoryFleetStore;
use crate::services::driver_service::CreateDriver;
use crate::services::owner_service::CreateOwner;
use crate::services::vehicle_service::CreateVehicle;
use crate::services::write_workflow::run_write;

pub fn ctx() -> RequestContext {
    RequestContext::new(Uuid::new_v4(), "admin@flota.co".to_string())
}

pub fn driver_request(national_id: &str) -> DriverRequest {
    DriverRequest {
        national_id: national_id.to_string(),
        first_name: "Carlos".to_string(),
        middle_name: None,
        last_name: "Pérez".to_string(),
        address: "Calle 10 # 5-20".to_string(),
        phone: "3001234567".to_string(),
        city: "Bogotá".to_string(),
        status: None,
    }
}

pub fn owner_request(national_id: &str) -> OwnerRequest {
    OwnerRequest {
        national_id: national_id.to_string(),
        first_name: "Lucía".to_string(),
        middle_name: None,
        last_name: "Martínez".to_string(),
        address: "Carrera 7 # 45-10".to_string(),
        phone: "3109876543".to_string(),
        city: "Medellín".to_string(),
        email: None,
        birth_date: None,
        status: None,
    }
}

pub fn vehicle_request(plate: &str, driver_id: Uuid, owner_id: Uuid) -> VehicleRequest {
    VehicleRequest {
        plate: plate.to_string(),
        color: "Blanco".to_string(),
        make: "Renault".to_string(),
        vehicle_class: Some(VehicleClass::Private),
        driver_id: driver_id.to_string(),
        owner_id: owner_id.to_string(),
        status: None,
    }
}

pub async fn seed_driver(store: &MemoryFleetStore, national_id: &str) -> Driver {
    run_write(store, &ctx(), CreateDriver::new(driver_request(national_id)))
        .await
        .unwrap()
}

pub async fn seed_owner(store: &MemoryFleetStore, national_id: &str) -> Owner {
    run_write(store, &ctx(), CreateOwner::new(owner_request(national_id)))
        .await
        .unwrap()
}

pub async fn seed_vehicle(
    store: &MemoryFleetStore,
    plate: &str,
    driver: &Driver,
    owner: &Owner,
) -> VehicleDetail {
    run_write(
        store,
        &ctx(),
        CreateVehicle::new(vehicle_request(plate, driver.id, owner.id)),
    )
    .await
    .unwrap()
}
