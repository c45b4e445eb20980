//! Manager commands: technicians and customer representatives

use super::{print_technicians, Output};
use anyhow::Result;
use clap::{Args, Subcommand};
use workshop_database::forms::{CustomerRepForm, TechnicianForm};
use workshop_database::Database;

#[derive(Args, Debug)]
pub struct ManagerArgs {
    #[command(subcommand)]
    pub command: ManagerCommand,
}

#[derive(Subcommand, Debug)]
pub enum ManagerCommand {
    /// Add a service technician
    AddTechnician {
        id: String,
        first_name: String,
        last_name: String,
        trained_for: String,
        specialization: String,
        /// Years of experience
        years: String,
    },

    /// List all technicians
    Technicians,

    /// Delete a technician and their job assignments
    DeleteTechnician { id: String },

    /// Add a customer representative
    AddRep {
        id: String,
        name: String,
        phone: String,
        /// Years of experience
        years: String,
    },

    /// List all customer representatives
    Reps,

    /// Delete a customer representative
    DeleteRep { id: String },

    /// Technicians who worked on jobs that used a part
    ByPart { part_no: String },
}

pub async fn run(db: &Database, args: ManagerArgs, out: &Output) -> Result<()> {
    match args.command {
        ManagerCommand::AddTechnician {
            id,
            first_name,
            last_name,
            trained_for,
            specialization,
            years,
        } => {
            let tech = TechnicianForm {
                technician_id: id,
                first_name,
                last_name,
                trained_for,
                specialization,
                years_of_experience: years,
            }
            .validate()?;
            db.add_technician(&tech).await?;
            out.done(&format!("Technician {} added", tech.technician_id))
        }

        ManagerCommand::Technicians => {
            let techs = db.list_technicians().await?;
            out.list(&techs, "No technicians on record.", print_technicians)
        }

        ManagerCommand::DeleteTechnician { id } => {
            let removed = db.delete_technician(id.trim()).await?;
            deleted(out, "Technician", &id, removed)
        }

        ManagerCommand::AddRep {
            id,
            name,
            phone,
            years,
        } => {
            let rep = CustomerRepForm {
                employee_id: id,
                name,
                phone_number: phone,
                years_of_experience: years,
            }
            .validate()?;
            db.add_customer_rep(&rep).await?;
            out.done(&format!("Customer representative {} added", rep.employee_id))
        }

        ManagerCommand::Reps => {
            let reps = db.list_customer_reps().await?;
            out.list(&reps, "No customer representatives on record.", |reps| {
                println!("{:<8} {:<25} {:<14} {:>4}", "ID", "NAME", "PHONE", "YOE");
                println!("{}", "-".repeat(54));
                for r in reps {
                    let phone = r.phone_number.map_or_else(|| "-".to_string(), |p| p.to_string());
                    println!(
                        "{:<8} {:<25} {:<14} {:>4}",
                        r.employee_id, r.name, phone, r.years_of_experience
                    );
                }
            })
        }

        ManagerCommand::DeleteRep { id } => {
            let removed = db.delete_customer_rep(id.trim()).await?;
            deleted(out, "Customer representative", &id, removed)
        }

        ManagerCommand::ByPart { part_no } => {
            let techs = db.technicians_by_part(part_no.trim()).await?;
            let empty = format!("No technicians have used part {}.", part_no.trim());
            out.list(&techs, &empty, |techs| {
                println!("Technicians who used part {}:", part_no.trim());
                for t in techs {
                    println!("  {:<8} {} {}", t.technician_id, t.first_name, t.last_name);
                }
            })
        }
    }
}

fn deleted(out: &Output, what: &str, id: &str, removed: u64) -> Result<()> {
    if removed == 0 {
        out.done(&format!("No {} with ID {} was found; nothing deleted", what.to_lowercase(), id.trim()))
    } else {
        out.done(&format!("{} {} deleted", what, id.trim()))
    }
}
