//! Shared fixtures: a fresh SQLite file per test with the schema applied

#![allow(dead_code)]

use std::time::Duration;
use tempfile::TempDir;
use workshop_database::{
    Database, DatabaseConfig, NewCustomer, NewCustomerRep, NewServiceJob, NewTechnician, NewVehicle,
};

pub struct TestDb {
    pub db: Database,
    _dir: TempDir,
}

impl std::ops::Deref for TestDb {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.db
    }
}

impl std::ops::DerefMut for TestDb {
    fn deref_mut(&mut self) -> &mut Database {
        &mut self.db
    }
}

pub fn sqlite_config(dir: &TempDir) -> DatabaseConfig {
    let path = dir.path().join("workshop.db");
    DatabaseConfig::url(format!("sqlite://{}?mode=rwc", path.display()))
        .acquire_timeout(Duration::from_millis(500))
}

pub async fn test_db() -> TestDb {
    test_db_with(|config| config).await
}

pub async fn test_db_with(adjust: impl FnOnce(DatabaseConfig) -> DatabaseConfig) -> TestDb {
    let dir = TempDir::new().expect("temp dir");
    let db = Database::connect(adjust(sqlite_config(&dir)))
        .await
        .expect("connect to sqlite");
    db.apply_schema().await.expect("apply schema");
    TestDb { db, _dir: dir }
}

pub fn technician(id: &str, first: &str, last: &str, yoe: i64) -> NewTechnician {
    NewTechnician {
        technician_id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        trained_for: "Engine".to_string(),
        specialization: "Petrol Engines".to_string(),
        years_of_experience: yoe,
    }
}

pub fn rep(id: &str, name: &str) -> NewCustomerRep {
    NewCustomerRep {
        employee_id: id.to_string(),
        name: name.to_string(),
        phone_number: 9876543210,
        years_of_experience: 4,
    }
}

pub fn customer(id: &str, name: &str, registered_by: Option<&str>) -> NewCustomer {
    NewCustomer {
        customer_id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id.to_lowercase()),
        phone: "9999990001".to_string(),
        license_no: format!("KL0123456789{}", id),
        age: 29,
        registered_by: registered_by.map(str::to_string),
    }
}

pub fn vehicle(reg_no: &str, customer_id: &str, registered_by: Option<&str>) -> NewVehicle {
    NewVehicle {
        reg_no: reg_no.to_string(),
        make: "Hyundai".to_string(),
        model: "i20".to_string(),
        year: 2020,
        chassis_no: format!("CHS{}", reg_no),
        body_type: "Hatchback".to_string(),
        customer_id: customer_id.to_string(),
        registered_by: registered_by.map(str::to_string),
    }
}

pub fn job(service_id: i64, reg_no: &str, start: &str) -> NewServiceJob {
    NewServiceJob {
        service_id,
        reg_no: reg_no.to_string(),
        service_type: "Oil Change".to_string(),
        description: "Routine oil change service".to_string(),
        start_date: start.parse().expect("start date"),
        predicted_end_date: start.parse().expect("end date"),
        predicted_cost: 2000,
        created_by: "E001".to_string(),
    }
}

/// One representative, customer, vehicle, technician and job, with the
/// technician assigned.
pub async fn seed_workshop(db: &Database) {
    db.add_customer_rep(&rep("E001", "Anjali Gupta")).await.unwrap();
    db.register_customer(&customer("C001", "Aditya Varma", Some("E001")))
        .await
        .unwrap();
    db.register_vehicle(&vehicle("KL01AB1234", "C001", Some("E001")))
        .await
        .unwrap();
    db.add_technician(&technician("T001", "Rahul", "Menon", 5))
        .await
        .unwrap();
    db.create_service_job(&job(1, "KL01AB1234", "2024-01-05"))
        .await
        .unwrap();
    db.assign_technician(1, "T001", Some("E001")).await.unwrap();
}
