//! Customer self-service commands

use super::{or_dash, Output};
use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use workshop_database::forms::{CustomerForm, VehicleForm};
use workshop_database::Database;

#[derive(Args, Debug)]
pub struct CustomerArgs {
    #[command(subcommand)]
    pub command: CustomerCommand,
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    /// Check a customer ID and show the customer
    Login { customer_id: String },

    /// Register yourself as a new customer
    Register {
        id: String,
        name: String,
        email: String,
        phone: String,
        license_no: String,
        age: String,
    },

    /// Register one of your vehicles
    AddVehicle {
        customer_id: String,
        reg_no: String,
        make: String,
        model: String,
        year: String,
        chassis_no: String,
        body_type: String,
    },

    /// List your vehicles
    Vehicles { customer_id: String },

    /// Show service history for your vehicles
    History { customer_id: String },
}

pub async fn run(db: &Database, args: CustomerArgs, out: &Output) -> Result<()> {
    match args.command {
        CustomerCommand::Login { customer_id } => {
            let customer = db
                .find_customer(customer_id.trim())
                .await?
                .ok_or_else(|| anyhow!("Customer ID {} not found", customer_id.trim()))?;

            if out.json {
                return out.print_json(&customer);
            }
            println!("Welcome, {} ({})", customer.name, customer.customer_id);
            println!("  Email: {}", or_dash(customer.email.as_deref()));
            println!("  Phone: {}", or_dash(customer.phone.as_deref()));
            Ok(())
        }

        CustomerCommand::Register {
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
                registered_by: None,
            }
            .validate()?;
            db.register_customer(&customer).await?;
            out.done(&format!("Welcome aboard, {}", customer.name))
        }

        CustomerCommand::AddVehicle {
            customer_id,
            reg_no,
            make,
            model,
            year,
            chassis_no,
            body_type,
        } => {
            let vehicle = VehicleForm {
                reg_no,
                make,
                model,
                year,
                chassis_no,
                body_type,
                customer_id,
                registered_by: None,
            }
            .validate()?;
            db.register_vehicle(&vehicle).await?;
            out.done(&format!("Vehicle {} registered", vehicle.reg_no))
        }

        CustomerCommand::Vehicles { customer_id } => {
            let vehicles = db.vehicles_for_customer(customer_id.trim()).await?;
            out.list(&vehicles, "No vehicles registered.", |vehicles| {
                println!(
                    "{:<12} {:<12} {:<14} {:>5} {:<12} {:<20}",
                    "REG NO", "MAKE", "MODEL", "YEAR", "BODY", "CHASSIS"
                );
                println!("{}", "-".repeat(80));
                for v in vehicles {
                    println!(
                        "{:<12} {:<12} {:<14} {:>5} {:<12} {:<20}",
                        v.reg_no,
                        v.make,
                        v.model,
                        v.year.map_or_else(|| "-".to_string(), |y| y.to_string()),
                        or_dash(v.body_type.as_deref()),
                        v.chassis_no
                    );
                }
            })
        }

        CustomerCommand::History { customer_id } => {
            let records = db.service_records_for_customer(customer_id.trim()).await?;
            out.list(&records, "No service records yet.", |records| {
                for r in records {
                    println!(
                        "Job {} on {} ({} {})",
                        r.service_id, r.reg_no, r.make, r.model
                    );
                    println!("  {}", or_dash(r.description.as_deref()));
                    println!(
                        "  {} to {}, estimate {}",
                        r.start_date,
                        or_dash(r.predicted_end_date.as_deref()),
                        r.predicted_cost.map_or_else(|| "-".to_string(), |c| c.to_string())
                    );
                }
            })
        }
    }
}
