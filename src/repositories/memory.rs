//! Almacén en memoria para las pruebas
//!
//! Una transacción toma el candado completo del almacén y trabaja sobre una
//! copia; `commit` la publica y descartarla la pierde. Las inserciones y
//! actualizaciones aplican las mismas restricciones de unicidad e integridad
//! referencial que los índices de PostgreSQL.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::constraint_checker::{ConstraintChecker, UniqueField};
use super::driver_repository::DriverRepository;
use super::owner_repository::OwnerRepository;
use super::person_repository::PersonRepository;
use super::report_repository::ReportRepository;
use super::store::{FleetStore, FleetTx};
use super::user_repository::UserRepository;
use super::vehicle_repository::{assemble_details, VehicleRepository};
use crate::models::report::{FleetStatistics, PersonReportRow, PersonStatistics};
use crate::models::{
    Driver, ListFilter, NewDriver, NewOwner, NewUser, NewVehicle, Owner, Page, PersonKind,
    RecordStatus, User, Vehicle, VehicleClass, VehicleDetail, Visibility,
};
use crate::utils::errors::{uniqueness_message, AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryData {
    pub drivers: Vec<Driver>,
    pub owners: Vec<Owner>,
    pub vehicles: Vec<Vehicle>,
    pub users: Vec<User>,
}

#[derive(Clone, Default)]
pub struct MemoryFleetStore {
    data: Arc<Mutex<MemoryData>>,
    fail_commit: Arc<AtomicBool>,
}

impl MemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// El próximo `commit` fallará como lo haría una base caída
    pub fn fail_next_commit(&self) {
        self.fail_commit.store(true, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> MemoryData {
        self.data.lock().await.clone()
    }
}

#[async_trait]
impl FleetStore for MemoryFleetStore {
    async fn begin(&self) -> AppResult<Box<dyn FleetTx>> {
        let guard = self.data.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryFleetTx {
            guard: Some(guard),
            staged,
            fail_commit: self.fail_commit.clone(),
        }))
    }
}

pub struct MemoryFleetTx {
    guard: Option<OwnedMutexGuard<MemoryData>>,
    staged: MemoryData,
    fail_commit: Arc<AtomicBool>,
}

fn visible(deleted: bool, visibility: Visibility) -> bool {
    visibility.includes_deleted() || !deleted
}

fn paginate<T>(mut items: Vec<T>, filter: &ListFilter) -> Page<T> {
    let total = items.len() as i64;
    let offset = filter.offset.max(0) as usize;
    let limit = filter.limit.max(0) as usize;
    let items = if offset >= items.len() {
        Vec::new()
    } else {
        items.drain(offset..).take(limit).collect()
    };
    Page { items, total }
}

fn taken(field: UniqueField) -> AppError {
    let name = match field {
        UniqueField::VehiclePlate => "plate",
        UniqueField::OwnerEmail => "email",
        _ => "national_id",
    };
    AppError::UniquenessViolation {
        field: name,
        message: uniqueness_message(name).to_string(),
    }
}

impl MemoryFleetTx {
    fn value_taken(&self, field: UniqueField, value: &str, exclude_id: Option<Uuid>) -> bool {
        let other = |id: Uuid| exclude_id != Some(id);
        match field {
            UniqueField::DriverNationalId => self
                .staged
                .drivers
                .iter()
                .any(|d| d.deleted_at.is_none() && other(d.id) && d.national_id == value),
            UniqueField::OwnerNationalId => self
                .staged
                .owners
                .iter()
                .any(|o| o.deleted_at.is_none() && other(o.id) && o.national_id == value),
            UniqueField::OwnerEmail => self.staged.owners.iter().any(|o| {
                o.deleted_at.is_none() && other(o.id) && o.email.as_deref() == Some(value)
            }),
            UniqueField::VehiclePlate => self
                .staged
                .vehicles
                .iter()
                .any(|v| v.deleted_at.is_none() && other(v.id) && v.plate == value),
        }
    }

    fn enforce_unique(&self, field: UniqueField, value: &str, exclude_id: Option<Uuid>) -> AppResult<()> {
        if self.value_taken(field, value, exclude_id) {
            return Err(taken(field));
        }
        Ok(())
    }

    /// Integridad referencial de la llave foránea: basta con que la fila exista
    fn enforce_references(&self, input: &NewVehicle) -> AppResult<()> {
        if !self.staged.drivers.iter().any(|d| d.id == input.driver_id) {
            return Err(AppError::ReferenceNotFound { field: "driver_id" });
        }
        if !self.staged.owners.iter().any(|o| o.id == input.owner_id) {
            return Err(AppError::ReferenceNotFound { field: "owner_id" });
        }
        Ok(())
    }

    fn person_is_live(&self, kind: PersonKind, id: Uuid) -> bool {
        match kind {
            PersonKind::Driver => self
                .staged
                .drivers
                .iter()
                .any(|d| d.id == id && d.deleted_at.is_none()),
            PersonKind::Owner => self
                .staged
                .owners
                .iter()
                .any(|o| o.id == id && o.deleted_at.is_none()),
        }
    }

    fn live_vehicles_of(&self, kind: PersonKind, id: Uuid) -> impl Iterator<Item = &Vehicle> + '_ {
        self.staged.vehicles.iter().filter(move |v| {
            v.deleted_at.is_none()
                && match kind {
                    PersonKind::Driver => v.driver_id == id,
                    PersonKind::Owner => v.owner_id == id,
                }
        })
    }

    /// Personas no eliminadas como filas de reporte, con su estado
    fn people(&self, kind: PersonKind) -> Vec<(RecordStatus, PersonReportRow)> {
        let rows: Vec<(RecordStatus, PersonReportRow)> = match kind {
            PersonKind::Driver => self
                .staged
                .drivers
                .iter()
                .filter(|d| d.deleted_at.is_none())
                .map(|d| {
                    (
                        d.status,
                        PersonReportRow {
                            id: d.id,
                            national_id: d.national_id.clone(),
                            first_name: d.first_name.clone(),
                            middle_name: d.middle_name.clone(),
                            last_name: d.last_name.clone(),
                            address: d.address.clone(),
                            phone: d.phone.clone(),
                            city: d.city.clone(),
                            registered_at: d.registered_at,
                            vehicle_count: 0,
                        },
                    )
                })
                .collect(),
            PersonKind::Owner => self
                .staged
                .owners
                .iter()
                .filter(|o| o.deleted_at.is_none())
                .map(|o| {
                    (
                        o.status,
                        PersonReportRow {
                            id: o.id,
                            national_id: o.national_id.clone(),
                            first_name: o.first_name.clone(),
                            middle_name: o.middle_name.clone(),
                            last_name: o.last_name.clone(),
                            address: o.address.clone(),
                            phone: o.phone.clone(),
                            city: o.city.clone(),
                            registered_at: o.registered_at,
                            vehicle_count: 0,
                        },
                    )
                })
                .collect(),
        };

        rows.into_iter()
            .map(|(status, mut row)| {
                row.vehicle_count = self.live_vehicles_of(kind, row.id).count() as i64;
                (status, row)
            })
            .collect()
    }

    fn details(&self, vehicles: Vec<Vehicle>) -> Vec<VehicleDetail> {
        assemble_details(
            vehicles,
            self.staged.drivers.clone(),
            self.staged.owners.clone(),
        )
    }
}

#[async_trait]
impl FleetTx for MemoryFleetTx {
    async fn commit(&mut self) -> AppResult<()> {
        let mut guard = self
            .guard
            .take()
            .ok_or_else(|| AppError::PersistenceFailed("transaction already finished".to_string()))?;

        if self.fail_commit.swap(false, Ordering::SeqCst) {
            return Err(AppError::PersistenceFailed("connection reset".to_string()));
        }

        *guard = std::mem::take(&mut self.staged);
        Ok(())
    }
}

#[async_trait]
impl ConstraintChecker for MemoryFleetTx {
    async fn is_unique(
        &mut self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        Ok(!self.value_taken(field, value, exclude_id))
    }

    async fn exists(&mut self, kind: PersonKind, id: Uuid) -> AppResult<bool> {
        Ok(self.person_is_live(kind, id))
    }
}

#[async_trait]
impl PersonRepository for MemoryFleetTx {
    async fn lock_for_delete(&mut self, kind: PersonKind, id: Uuid) -> AppResult<bool> {
        Ok(self.person_is_live(kind, id))
    }

    async fn count_dependents(&mut self, kind: PersonKind, id: Uuid) -> AppResult<i64> {
        Ok(self.live_vehicles_of(kind, id).count() as i64)
    }

    async fn soft_delete(&mut self, kind: PersonKind, id: Uuid) -> AppResult<bool> {
        let now = Some(Utc::now());
        let slot = match kind {
            PersonKind::Driver => self
                .staged
                .drivers
                .iter_mut()
                .find(|d| d.id == id && d.deleted_at.is_none())
                .map(|d| &mut d.deleted_at),
            PersonKind::Owner => self
                .staged
                .owners
                .iter_mut()
                .find(|o| o.id == id && o.deleted_at.is_none())
                .map(|o| &mut o.deleted_at),
        };

        match slot {
            Some(deleted_at) => {
                *deleted_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl DriverRepository for MemoryFleetTx {
    async fn insert_driver(&mut self, input: &NewDriver) -> AppResult<Driver> {
        self.enforce_unique(UniqueField::DriverNationalId, &input.national_id, None)?;

        let now = Utc::now();
        let driver = Driver {
            id: Uuid::new_v4(),
            national_id: input.national_id.clone(),
            first_name: input.first_name.clone(),
            middle_name: input.middle_name.clone(),
            last_name: input.last_name.clone(),
            address: input.address.clone(),
            phone: input.phone.clone(),
            city: input.city.clone(),
            status: input.status,
            registered_at: now,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.staged.drivers.push(driver.clone());
        Ok(driver)
    }

    async fn update_driver(&mut self, id: Uuid, input: &NewDriver) -> AppResult<Option<Driver>> {
        self.enforce_unique(UniqueField::DriverNationalId, &input.national_id, Some(id))?;

        let Some(driver) = self
            .staged
            .drivers
            .iter_mut()
            .find(|d| d.id == id && d.deleted_at.is_none())
        else {
            return Ok(None);
        };

        driver.national_id = input.national_id.clone();
        driver.first_name = input.first_name.clone();
        driver.middle_name = input.middle_name.clone();
        driver.last_name = input.last_name.clone();
        driver.address = input.address.clone();
        driver.phone = input.phone.clone();
        driver.city = input.city.clone();
        driver.status = input.status;
        driver.updated_at = Utc::now();
        Ok(Some(driver.clone()))
    }

    async fn find_driver(&mut self, id: Uuid, visibility: Visibility) -> AppResult<Option<Driver>> {
        Ok(self
            .staged
            .drivers
            .iter()
            .find(|d| d.id == id && visible(d.is_deleted(), visibility))
            .cloned())
    }

    async fn find_drivers_by_ids(&mut self, ids: &[Uuid]) -> AppResult<Vec<Driver>> {
        Ok(self
            .staged
            .drivers
            .iter()
            .filter(|d| ids.contains(&d.id))
            .cloned()
            .collect())
    }

    async fn list_drivers(&mut self, filter: &ListFilter) -> AppResult<Page<Driver>> {
        let mut items: Vec<Driver> = self
            .staged
            .drivers
            .iter()
            .filter(|d| visible(d.is_deleted(), filter.visibility))
            .filter(|d| filter.status.map_or(true, |s| d.status == s))
            .filter(|d| filter.matches_search(&[
                    d.national_id.as_str(),
                    d.first_name.as_str(),
                    d.last_name.as_str(),
                ]))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(paginate(items, filter))
    }
}

#[async_trait]
impl OwnerRepository for MemoryFleetTx {
    async fn insert_owner(&mut self, input: &NewOwner) -> AppResult<Owner> {
        self.enforce_unique(UniqueField::OwnerNationalId, &input.national_id, None)?;
        if let Some(email) = &input.email {
            self.enforce_unique(UniqueField::OwnerEmail, email, None)?;
        }

        let now = Utc::now();
        let owner = Owner {
            id: Uuid::new_v4(),
            national_id: input.national_id.clone(),
            first_name: input.first_name.clone(),
            middle_name: input.middle_name.clone(),
            last_name: input.last_name.clone(),
            address: input.address.clone(),
            phone: input.phone.clone(),
            city: input.city.clone(),
            email: input.email.clone(),
            birth_date: input.birth_date,
            status: input.status,
            registered_at: now,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.staged.owners.push(owner.clone());
        Ok(owner)
    }

    async fn update_owner(&mut self, id: Uuid, input: &NewOwner) -> AppResult<Option<Owner>> {
        self.enforce_unique(UniqueField::OwnerNationalId, &input.national_id, Some(id))?;
        if let Some(email) = &input.email {
            self.enforce_unique(UniqueField::OwnerEmail, email, Some(id))?;
        }

        let Some(owner) = self
            .staged
            .owners
            .iter_mut()
            .find(|o| o.id == id && o.deleted_at.is_none())
        else {
            return Ok(None);
        };

        owner.national_id = input.national_id.clone();
        owner.first_name = input.first_name.clone();
        owner.middle_name = input.middle_name.clone();
        owner.last_name = input.last_name.clone();
        owner.address = input.address.clone();
        owner.phone = input.phone.clone();
        owner.city = input.city.clone();
        owner.email = input.email.clone();
        owner.birth_date = input.birth_date;
        owner.status = input.status;
        owner.updated_at = Utc::now();
        Ok(Some(owner.clone()))
    }

    async fn find_owner(&mut self, id: Uuid, visibility: Visibility) -> AppResult<Option<Owner>> {
        Ok(self
            .staged
            .owners
            .iter()
            .find(|o| o.id == id && visible(o.is_deleted(), visibility))
            .cloned())
    }

    async fn find_owners_by_ids(&mut self, ids: &[Uuid]) -> AppResult<Vec<Owner>> {
        Ok(self
            .staged
            .owners
            .iter()
            .filter(|o| ids.contains(&o.id))
            .cloned()
            .collect())
    }

    async fn list_owners(&mut self, filter: &ListFilter) -> AppResult<Page<Owner>> {
        let mut items: Vec<Owner> = self
            .staged
            .owners
            .iter()
            .filter(|o| visible(o.is_deleted(), filter.visibility))
            .filter(|o| filter.status.map_or(true, |s| o.status == s))
            .filter(|o| {
                filter.matches_search(&[
                    o.national_id.as_str(),
                    o.first_name.as_str(),
                    o.last_name.as_str(),
                    o.email.as_deref().unwrap_or_default(),
                ])
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(paginate(items, filter))
    }
}

#[async_trait]
impl VehicleRepository for MemoryFleetTx {
    async fn insert_vehicle(&mut self, input: &NewVehicle) -> AppResult<Vehicle> {
        self.enforce_unique(UniqueField::VehiclePlate, &input.plate, None)?;
        self.enforce_references(input)?;

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            plate: input.plate.clone(),
            color: input.color.clone(),
            make: input.make.clone(),
            vehicle_class: input.vehicle_class,
            driver_id: input.driver_id,
            owner_id: input.owner_id,
            status: input.status,
            registered_at: now,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.staged.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update_vehicle(&mut self, id: Uuid, input: &NewVehicle) -> AppResult<Option<Vehicle>> {
        self.enforce_unique(UniqueField::VehiclePlate, &input.plate, Some(id))?;
        self.enforce_references(input)?;

        let Some(vehicle) = self
            .staged
            .vehicles
            .iter_mut()
            .find(|v| v.id == id && v.deleted_at.is_none())
        else {
            return Ok(None);
        };

        vehicle.plate = input.plate.clone();
        vehicle.color = input.color.clone();
        vehicle.make = input.make.clone();
        vehicle.vehicle_class = input.vehicle_class;
        vehicle.driver_id = input.driver_id;
        vehicle.owner_id = input.owner_id;
        vehicle.status = input.status;
        vehicle.updated_at = Utc::now();
        Ok(Some(vehicle.clone()))
    }

    async fn deactivate_vehicle(&mut self, id: Uuid) -> AppResult<bool> {
        match self
            .staged
            .vehicles
            .iter_mut()
            .find(|v| v.id == id && v.deleted_at.is_none())
        {
            Some(vehicle) => {
                vehicle.status = RecordStatus::Inactive;
                vehicle.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_vehicle(&mut self, id: Uuid, visibility: Visibility) -> AppResult<Option<Vehicle>> {
        Ok(self
            .staged
            .vehicles
            .iter()
            .find(|v| v.id == id && visible(v.deleted_at.is_some(), visibility))
            .cloned())
    }

    async fn find_vehicle_detail(
        &mut self,
        id: Uuid,
        visibility: Visibility,
    ) -> AppResult<Option<VehicleDetail>> {
        let vehicle = self.find_vehicle(id, visibility).await?;
        Ok(vehicle.and_then(|v| self.details(vec![v]).pop()))
    }

    async fn list_vehicle_details(&mut self, filter: &ListFilter) -> AppResult<Page<VehicleDetail>> {
        let mut vehicles: Vec<Vehicle> = self
            .staged
            .vehicles
            .iter()
            .filter(|v| visible(v.deleted_at.is_some(), filter.visibility))
            .filter(|v| filter.status.map_or(true, |s| v.status == s))
            .filter(|v| filter.vehicle_class.map_or(true, |c| v.vehicle_class == c))
            .filter(|v| filter.matches_search(&[v.plate.as_str(), v.make.as_str(), v.color.as_str()]))
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));

        let page = paginate(vehicles, filter);
        Ok(Page {
            items: self.details(page.items),
            total: page.total,
        })
    }

    async fn vehicles_for_person(&mut self, kind: PersonKind, id: Uuid) -> AppResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self.live_vehicles_of(kind, id).cloned().collect();
        vehicles.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(vehicles)
    }
}

#[async_trait]
impl UserRepository for MemoryFleetTx {
    async fn insert_user(&mut self, input: &NewUser) -> AppResult<User> {
        if self.staged.users.iter().any(|u| u.email == input.email) {
            return Err(AppError::UniquenessViolation {
                field: "email",
                message: uniqueness_message("email").to_string(),
            });
        }

        let user = User {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        self.staged.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.staged.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        Ok(self.staged.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl ReportRepository for MemoryFleetTx {
    async fn fleet_statistics(&mut self) -> AppResult<FleetStatistics> {
        let live: Vec<&Vehicle> = self
            .staged
            .vehicles
            .iter()
            .filter(|v| v.deleted_at.is_none())
            .collect();
        let count = |pred: &dyn Fn(&Vehicle) -> bool| live.iter().filter(|v| pred(**v)).count() as i64;
        let active = |v: &Vehicle| v.status == RecordStatus::Active;
        let private = |v: &Vehicle| v.vehicle_class == VehicleClass::Private;

        let drivers = self.people(PersonKind::Driver);
        let owners = self.people(PersonKind::Owner);

        Ok(FleetStatistics {
            total_vehicles: live.len() as i64,
            active_vehicles: count(&active),
            private_vehicles: count(&private),
            public_vehicles: count(&|v: &Vehicle| !private(v)),
            active_private_vehicles: count(&|v: &Vehicle| active(v) && private(v)),
            active_public_vehicles: count(&|v: &Vehicle| active(v) && !private(v)),
            total_drivers: drivers.len() as i64,
            active_drivers: drivers.iter().filter(|(s, _)| *s == RecordStatus::Active).count() as i64,
            drivers_with_vehicles: drivers.iter().filter(|(_, r)| r.vehicle_count > 0).count() as i64,
            total_owners: owners.len() as i64,
            active_owners: owners.iter().filter(|(s, _)| *s == RecordStatus::Active).count() as i64,
            owners_with_vehicles: owners.iter().filter(|(_, r)| r.vehicle_count > 0).count() as i64,
        })
    }

    async fn person_statistics(&mut self, kind: PersonKind) -> AppResult<PersonStatistics> {
        let people = self.people(kind);
        let total = people.len() as i64;
        let with_vehicles = people.iter().filter(|(_, r)| r.vehicle_count > 0).count() as i64;

        Ok(PersonStatistics {
            total,
            active: people.iter().filter(|(s, _)| *s == RecordStatus::Active).count() as i64,
            with_vehicles,
            without_vehicles: total - with_vehicles,
        })
    }

    async fn person_report(&mut self, kind: PersonKind) -> AppResult<Vec<PersonReportRow>> {
        let mut rows: Vec<PersonReportRow> = self
            .people(kind)
            .into_iter()
            .filter(|(status, _)| *status == RecordStatus::Active)
            .map(|(_, row)| row)
            .collect();
        rows.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(rows)
    }
}
