//! Technician commands: assigned jobs, complaints and parts

use super::{or_dash, Output};
use anyhow::Result;
use clap::{Args, Subcommand};
use workshop_database::forms;
use workshop_database::Database;

#[derive(Args, Debug)]
pub struct TechArgs {
    #[command(subcommand)]
    pub command: TechCommand,
}

#[derive(Subcommand, Debug)]
pub enum TechCommand {
    /// List jobs assigned to a technician
    Jobs { technician_id: String },

    /// Show a job with its vehicle, owner, complaints and parts
    Job { service_id: String },

    /// Record a complaint against a job
    Complain { service_id: String, complaint: String },

    /// List complaints for a job
    Complaints { service_id: String },

    /// Add parts used on a job
    AddParts {
        service_id: String,
        /// PartNo:Quantity:Price, one per argument
        #[arg(required = true)]
        parts: Vec<String>,
    },

    /// List parts used on a job with the total cost
    Parts { service_id: String },
}

pub async fn run(db: &Database, args: TechArgs, out: &Output) -> Result<()> {
    match args.command {
        TechCommand::Jobs { technician_id } => {
            let jobs = db.jobs_for_technician(technician_id.trim()).await?;
            out.list(&jobs, "No jobs assigned.", |jobs| {
                println!(
                    "{:<6} {:<12} {:<22} {:<16} {:<11} {:<11} {:>8}",
                    "JOB", "REG NO", "VEHICLE", "SERVICE", "START", "DUE", "COST"
                );
                println!("{}", "-".repeat(92));
                for j in jobs {
                    println!(
                        "{:<6} {:<12} {:<22} {:<16} {:<11} {:<11} {:>8}",
                        j.service_id,
                        j.reg_no,
                        format!("{} {}", j.make, j.model),
                        or_dash(j.service_type.as_deref()),
                        j.start_date,
                        or_dash(j.predicted_end_date.as_deref()),
                        j.predicted_cost.map_or_else(|| "-".to_string(), |c| c.to_string())
                    );
                }
            })
        }

        TechCommand::Job { service_id } => {
            let service_id = forms::service_id(&service_id)?;
            let details = db.job_details(service_id).await?;
            let complaints = db.complaints_for_job(service_id).await?;
            let parts = db.parts_for_job(service_id).await?;

            if out.json {
                return out.print_json(&serde_json::json!({
                    "job": details,
                    "complaints": complaints,
                    "parts": parts,
                }));
            }

            println!("Service Job {}", details.service_id);
            println!("  Service:     {}", or_dash(details.service_type.as_deref()));
            println!("  Description: {}", or_dash(details.description.as_deref()));
            println!(
                "  Dates:       {} to {}",
                details.start_date,
                or_dash(details.predicted_end_date.as_deref())
            );
            if let Some(cost) = details.predicted_cost {
                println!("  Estimate:    {}", cost);
            }
            println!();
            println!("Vehicle {}", details.reg_no);
            println!(
                "  {} {} ({})",
                details.make,
                details.model,
                details.year.map_or_else(|| "-".to_string(), |y| y.to_string())
            );
            println!("  Chassis:     {}", details.chassis_no);
            println!("  Body:        {}", or_dash(details.body_type.as_deref()));
            println!();
            println!("Customer {} - {}", details.customer_id, details.customer_name);
            println!("  Phone:       {}", or_dash(details.customer_phone.as_deref()));
            println!("  Email:       {}", or_dash(details.customer_email.as_deref()));

            if !complaints.is_empty() {
                println!("\nComplaints:");
                for c in &complaints {
                    println!("  - {} [{}]", c.complaint, c.fixed.as_deref().unwrap_or("open"));
                }
            }

            if !parts.is_empty() {
                println!("\nParts:");
                for p in &parts {
                    println!("  {:<12} {:>4} x {:>8} = {:>10}", p.part_no, p.quantity, p.price, p.total);
                }
            }
            println!("\nTotal parts cost: {}", details.total_parts_cost);
            Ok(())
        }

        TechCommand::Complain {
            service_id,
            complaint,
        } => {
            let service_id = forms::service_id(&service_id)?;
            let complaint = complaint.trim();
            if complaint.is_empty() {
                return Err(forms::ValidationError::Missing("Complaint").into());
            }
            db.add_complaint(service_id, complaint).await?;
            out.done(&format!("Complaint recorded for job {}", service_id))
        }

        TechCommand::Complaints { service_id } => {
            let service_id = forms::service_id(&service_id)?;
            let complaints = db.complaints_for_job(service_id).await?;
            out.list(&complaints, "No complaints recorded.", |complaints| {
                for c in complaints {
                    println!("- {} [{}]", c.complaint, c.fixed.as_deref().unwrap_or("open"));
                }
            })
        }

        TechCommand::AddParts { service_id, parts } => {
            let service_id = forms::service_id(&service_id)?;
            let parts = forms::parts(&parts.join("\n"))?;
            let added = db.add_parts(service_id, &parts).await?;
            out.done(&format!("{} part(s) added to job {}", added, service_id))
        }

        TechCommand::Parts { service_id } => {
            let service_id = forms::service_id(&service_id)?;
            let parts = db.parts_for_job(service_id).await?;
            let total = db.total_parts_cost(service_id).await?;

            if out.json {
                return out.print_json(&serde_json::json!({ "parts": parts, "total": total }));
            }
            if parts.is_empty() {
                println!("No parts recorded.");
                return Ok(());
            }

            println!("{:<12} {:>6} {:>10} {:>12}", "PART", "QTY", "PRICE", "TOTAL");
            println!("{}", "-".repeat(43));
            for p in &parts {
                println!("{:<12} {:>6} {:>10} {:>12}", p.part_no, p.quantity, p.price, p.total);
            }
            println!("{}", "-".repeat(43));
            println!("{:<30} {:>12}", "Total", total);
            Ok(())
        }
    }
}
