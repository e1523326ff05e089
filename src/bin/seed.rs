//! Folio Seed - load the sample profile into MongoDB
//!
//! Clears any existing profile documents and inserts the bundled sample.
//!
//! Usage:
//!   folio-seed --mongodb-uri mongodb://localhost:27017 --mongodb-db folio
//!
//! Environment variables:
//!   MONGODB_URI - MongoDB connection URI (default: mongodb://localhost:27017)
//!   MONGODB_DB - database name (default: folio)

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio::db::schemas::{
    Education, Links, ProfileDoc, Project, ProjectLinks, Skills, WorkEntry,
};
use folio::db::{MongoClient, ProfileStore};

#[derive(Parser, Debug)]
#[command(name = "folio-seed")]
#[command(about = "Seed the Folio database with the sample profile")]
struct Args {
    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "folio")]
    mongodb_db: String,
}

fn sample_profile() -> ProfileDoc {
    ProfileDoc {
        name: "Jane Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        title: "Software Engineer".to_string(),
        bio: "Curious engineer who loves building web apps and learning new tech.".to_string(),
        location: "Bangalore, India".to_string(),
        education: vec![Education {
            institution: "IIT Bombay".to_string(),
            degree: "B.Tech".to_string(),
            field: "Computer Science".to_string(),
            year: "2021".to_string(),
            gpa: "3.7".to_string(),
        }],
        skills: Skills {
            technical: vec![
                "JavaScript".to_string(),
                "React".to_string(),
                "Node.js".to_string(),
                "MongoDB".to_string(),
                "Python".to_string(),
            ],
            soft: vec![
                "Problem Solving".to_string(),
                "Teamwork".to_string(),
                "Adaptability".to_string(),
            ],
            languages: vec!["English".to_string(), "Hindi".to_string()],
        },
        projects: vec![Project {
            title: "Portfolio Website".to_string(),
            description: "Personal portfolio built with React and Tailwind CSS.".to_string(),
            links: ProjectLinks {
                github: Some("https://github.com/janedoe/portfolio".to_string()),
                demo: Some("https://janedoe.dev".to_string()),
                docs: None,
            },
            skills: vec![
                "React".to_string(),
                "Tailwind".to_string(),
                "Netlify".to_string(),
            ],
            featured: true,
        }],
        work: vec![WorkEntry {
            company: "TechStart".to_string(),
            position: "Software Engineer".to_string(),
            duration: "2021 - Present".to_string(),
            description: "Developed web apps and APIs for client projects.".to_string(),
            skills: vec![
                "React".to_string(),
                "Node.js".to_string(),
                "MongoDB".to_string(),
            ],
        }],
        links: Links {
            github: Some("https://github.com/janedoe".to_string()),
            linkedin: Some("https://linkedin.com/in/janedoe".to_string()),
            portfolio: Some("https://janedoe.dev".to_string()),
            resume: Some("https://janedoe.dev/resume.pdf".to_string()),
        },
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mongo = MongoClient::connect(&args.mongodb_uri, &args.mongodb_db).await?;
    let store = ProfileStore::new(mongo).await?;

    // Clear existing data, including soft-deleted documents
    let removed = store.purge().await?;
    info!("Cleared existing profile data ({} removed)", removed);
    match store.create(sample_profile()).await {
        Ok(profile) => {
            info!("Sample profile created successfully for {}", profile.name);
            info!("Database seeded successfully!");
            Ok(())
        }
        Err(e) => {
            error!("Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}
