//! Customer representative commands: registrations, jobs and assignments

use super::{or_dash, print_technicians, Output};
use anyhow::Result;
use clap::{Args, Subcommand};
use workshop_database::forms::{self, CustomerForm, ServiceJobForm, ValidationError, VehicleForm};
use workshop_database::Database;

#[derive(Args, Debug)]
pub struct RepArgs {
    /// Employee ID of the representative at the desk, required for registrations and new jobs
    #[arg(short, long, env = "WORKSHOP_EMPLOYEE_ID")]
    pub employee: Option<String>,

    #[command(subcommand)]
    pub command: RepCommand,
}

#[derive(Subcommand, Debug)]
pub enum RepCommand {
    /// Register a customer
    RegisterCustomer {
        id: String,
        name: String,
        email: String,
        phone: String,
        license_no: String,
        age: String,
    },

    /// Register a vehicle for a customer
    RegisterVehicle {
        reg_no: String,
        make: String,
        model: String,
        year: String,
        chassis_no: String,
        body_type: String,
        customer_id: String,
    },

    /// Open a service job for a vehicle
    CreateJob {
        service_id: String,
        reg_no: String,
        service_type: String,
        description: String,
        /// YYYY-MM-DD
        start_date: String,
        /// YYYY-MM-DD
        predicted_end_date: String,
        predicted_cost: String,
    },

    /// Assign a technician to a job
    Assign {
        service_id: String,
        technician_id: String,
    },

    /// List all customers
    Customers,

    /// List technicians available for assignment
    Technicians,
}

fn require_employee(employee: Option<&str>) -> Result<String, ValidationError> {
    match employee.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ValidationError::Missing("Employee ID")),
    }
}

pub async fn run(db: &Database, args: RepArgs, out: &Output) -> Result<()> {
    let employee = args.employee.as_deref();

    match args.command {
        RepCommand::RegisterCustomer {
            id,
            name,
            email,
            phone,
            license_no,
            age,
        } => {
            let customer = CustomerForm {
                customer_id: id,
                name,
                email,
                phone,
                license_no,
                age,
                registered_by: Some(require_employee(employee)?),
            }
            .validate()?;
            db.register_customer(&customer).await?;
            out.done(&format!("Customer {} registered", customer.customer_id))
        }

        RepCommand::RegisterVehicle {
            reg_no,
            make,
            model,
            year,
            chassis_no,
            body_type,
            customer_id,
        } => {
            let vehicle = VehicleForm {
                reg_no,
                make,
                model,
                year,
                chassis_no,
                body_type,
                customer_id,
                registered_by: Some(require_employee(employee)?),
            }
            .validate()?;
            db.register_vehicle(&vehicle).await?;
            out.done(&format!(
                "Vehicle {} registered to {}",
                vehicle.reg_no, vehicle.customer_id
            ))
        }

        RepCommand::CreateJob {
            service_id,
            reg_no,
            service_type,
            description,
            start_date,
            predicted_end_date,
            predicted_cost,
        } => {
            let job = ServiceJobForm {
                service_id,
                reg_no,
                service_type,
                description,
                start_date,
                predicted_end_date,
                predicted_cost,
                created_by: require_employee(employee)?,
            }
            .validate()?;
            db.create_service_job(&job).await?;
            out.done(&format!("Service job {} created for {}", job.service_id, job.reg_no))
        }

        RepCommand::Assign {
            service_id,
            technician_id,
        } => {
            let service_id = forms::service_id(&service_id)?;
            let technician_id = technician_id.trim();
            let assigned_by = employee.map(str::trim).filter(|id| !id.is_empty());
            db.assign_technician(service_id, technician_id, assigned_by)
                .await?;
            out.done(&format!(
                "Technician {} assigned to job {}",
                technician_id, service_id
            ))
        }

        RepCommand::Customers => {
            let customers = db.list_customers().await?;
            out.list(&customers, "No customers registered yet.", |customers| {
                println!("{:<8} {:<25} {:<30} {:<14}", "ID", "NAME", "EMAIL", "PHONE");
                println!("{}", "-".repeat(80));
                for c in customers {
                    println!(
                        "{:<8} {:<25} {:<30} {:<14}",
                        c.customer_id,
                        c.name,
                        or_dash(c.email.as_deref()),
                        or_dash(c.phone.as_deref())
                    );
                }
            })
        }

        RepCommand::Technicians => {
            let techs = db.list_technicians().await?;
            out.list(&techs, "No technicians on record.", print_technicians)
        }
    }
}
