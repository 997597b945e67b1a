use chrono::Local;
use clap::Args;
use talent_desk::directory::{
    ActivityAction, ActivityStatus, AdminDraft, CandidateDraft, CandidatePatch, CandidateStatus,
    CompanyDraft, CompanySize, DashboardSummary, DirectoryService, ListQuery,
    DEFAULT_RECENT_ACTIVITY,
};
use talent_desk::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Search term applied to the candidate list after seeding
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Print the dashboard summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let directory = DirectoryService::in_memory();
    seed_directory(&directory)?;

    let summary = directory.dashboard(DEFAULT_RECENT_ACTIVITY)?;
    if args.json {
        println!("{}", summary_json(&summary)?);
    } else {
        render_summary(&summary);
    }

    if let Some(term) = args.search {
        let matches = directory.candidates().list(&ListQuery::search(term.as_str()))?;
        println!("\nCandidates matching '{term}': {}", matches.len());
        for candidate in matches {
            println!(
                "  {} {} <{}> [{}]",
                candidate.id,
                candidate.name,
                candidate.email,
                candidate.status.label()
            );
        }
    }

    Ok(())
}

fn seed_directory(directory: &DirectoryService) -> Result<(), AppError> {
    directory.admins().add(AdminDraft {
        full_name: "Priya Raman".to_string(),
        email: "priya.raman@talentdesk.example".to_string(),
        role: "Super Admin".to_string(),
        whatsapp_number: Some("+91 98450 12345".to_string()),
        employee_id: "EMP-0001".to_string(),
        designation: "Head of Talent".to_string(),
        office_address: Some("Bengaluru".to_string()),
        profile_image_url: None,
        status: ActivityStatus::Active,
    })?;
    directory.admins().add(AdminDraft {
        full_name: "Tomás Ortega".to_string(),
        email: "tomas.ortega@talentdesk.example".to_string(),
        role: "Recruiter".to_string(),
        whatsapp_number: None,
        employee_id: "EMP-0002".to_string(),
        designation: "Technical Recruiter".to_string(),
        office_address: None,
        profile_image_url: None,
        status: ActivityStatus::Inactive,
    })?;

    let candidates = [
        (
            "Mei Lin",
            "mei.lin@example.com",
            "Singapore",
            CandidateStatus::Screening,
            vec!["Rust", "Kubernetes"],
        ),
        (
            "Jonas Berg",
            "jonas.berg@example.com",
            "Oslo",
            CandidateStatus::Interview,
            vec!["Go", "PostgreSQL"],
        ),
        (
            "Amara Okafor",
            "amara.okafor@example.com",
            "Lagos",
            CandidateStatus::New,
            vec!["TypeScript", "React"],
        ),
        (
            "Lucas Martin",
            "lucas.martin@example.com",
            "Lyon",
            CandidateStatus::Rejected,
            vec!["Java"],
        ),
    ];
    let mut interviewing = None;
    for (name, email, location, status, skills) in candidates {
        let candidate = directory.candidates().add(CandidateDraft {
            name: name.to_string(),
            email: email.to_string(),
            phone: "+1 555 0100".to_string(),
            location: Some(location.to_string()),
            status,
            skills: skills.into_iter().map(str::to_string).collect(),
        })?;
        if status == CandidateStatus::Interview {
            interviewing = Some(candidate.id);
        }
    }
    if let Some(id) = interviewing {
        directory.candidates().patch(
            &id,
            CandidatePatch {
                status: Some(CandidateStatus::Hired),
                ..CandidatePatch::default()
            },
        )?;
    }

    directory.companies().add(CompanyDraft {
        name: "Northwind Robotics".to_string(),
        industry: "Manufacturing".to_string(),
        founded: Some("2009".to_string()),
        website: Some("https://northwind.example".to_string()),
        email: Some("careers@northwind.example".to_string()),
        phone: Some("+1 206 555 0142".to_string()),
        address: Some("Seattle, WA".to_string()),
        size: CompanySize::Large,
        status: ActivityStatus::Active,
    })?;
    directory.companies().add(CompanyDraft {
        name: "Fjord Analytics".to_string(),
        industry: "Software".to_string(),
        founded: None,
        website: None,
        email: None,
        phone: None,
        address: None,
        size: CompanySize::Small,
        status: ActivityStatus::Active,
    })?;

    Ok(())
}

fn summary_json(summary: &DashboardSummary) -> Result<String, AppError> {
    serde_json::to_string_pretty(summary).map_err(|err| AppError::Io(err.into()))
}

fn render_summary(summary: &DashboardSummary) {
    println!("Talent Desk dashboard ({})", Local::now().format("%Y-%m-%d %H:%M"));
    println!(
        "  Admins: {} total, {} active",
        summary.admins.total, summary.admins.active
    );
    println!(
        "  Candidates: {} total, {} active",
        summary.candidates.total, summary.candidates.active
    );
    println!(
        "  Companies: {} total, {} active",
        summary.companies.total, summary.companies.active
    );

    println!("Candidate pipeline:");
    for stage in &summary.candidate_pipeline {
        println!("  {:<10} {}", stage.status_label, stage.count);
    }

    println!("Recent activity:");
    for entry in &summary.recent_activity {
        let action = match entry.action {
            ActivityAction::Created => "created",
            ActivityAction::Updated => "updated",
        };
        println!(
            "  {} {} {} ({}) {}",
            entry.at.format("%H:%M:%S"),
            entry.kind_label,
            entry.name,
            entry.id,
            action
        );
    }
}
