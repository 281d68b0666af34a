//! Development seed data: two professors, two students, three posts.
//!
//! Idempotent: users whose email already exists are kept as they are, and
//! posts are only created for a professor who has none yet.

use anyhow::{Context, Result};

use edublog_core::domain::{Post, Professor, Role, Student, User};
use edublog_core::ports::{
    PasswordService, PostRepository, ProfessorRepository, StudentRepository, UserRepository,
};
use edublog_infra::{
    Argon2PasswordService, DatabaseConfig, PostgresPostRepository, PostgresProfessorRepository,
    PostgresStudentRepository, PostgresUserRepository,
};

/// Every demo account logs in with this.
const DEMO_PASSWORD: &str = "123456";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let db = DatabaseConfig::new(url).connect().await?;

    let users = PostgresUserRepository::new(db.clone());
    let professors = PostgresProfessorRepository::new(db.clone());
    let students = PostgresStudentRepository::new(db.clone());
    let posts = PostgresPostRepository::new(db);

    let password_hash = Argon2PasswordService::new().hash(DEMO_PASSWORD)?;

    let john = ensure_professor(
        &users,
        &professors,
        &password_hash,
        "John Silva",
        "professor@example.com",
        "Software engineering professor with ten years of industry experience.",
        "Mobile Development",
    )
    .await?;

    let maria = ensure_professor(
        &users,
        &professors,
        &password_hash,
        "Maria Santos",
        "maria@example.com",
        "Specialist in DevOps and cloud computing.",
        "DevOps",
    )
    .await?;

    ensure_student(
        &users,
        &students,
        &password_hash,
        "Peter Costa",
        "student@example.com",
        "2026001",
        "Year 3",
    )
    .await?;

    ensure_student(
        &users,
        &students,
        &password_hash,
        "Ana Oliveira",
        "ana@example.com",
        "2026002",
        "Year 2",
    )
    .await?;

    if posts.count_by_author(john.id).await? == 0 {
        posts
            .insert(&Post::new(
                john.id,
                "Getting Started with Mobile Development".to_string(),
                Some("The core concepts behind building your first mobile app.".to_string()),
                "Mobile development rewards small, finished projects. Start with a single \
                 screen, wire it to a real API, and ship it to a device you own. Once the \
                 feedback loop is in place, layering on navigation, state management and \
                 offline storage becomes a sequence of small steps instead of one big leap."
                    .to_string(),
                true,
            ))
            .await?;
        posts
            .insert(&Post::new(
                john.id,
                "REST APIs in Practice".to_string(),
                Some("What a well-behaved API looks like from the client's side.".to_string()),
                "A good REST API is boring in the best sense: predictable resource names, \
                 honest status codes and pagination that never lies about totals. This post \
                 walks through the conventions this platform follows and why each one makes \
                 the mobile client simpler to write."
                    .to_string(),
                true,
            ))
            .await?;
        tracing::info!("Seeded posts for {}", "professor@example.com");
    }

    if posts.count_by_author(maria.id).await? == 0 {
        posts
            .insert(&Post::new(
                maria.id,
                "A Gentle Introduction to CI/CD".to_string(),
                Some("From push to production without touching a server.".to_string()),
                "Continuous integration is a habit before it is a toolchain. Run the tests \
                 on every push, keep the build green, and deploys stop being events. Here we \
                 set up a minimal pipeline and grow it only when a real pain point appears."
                    .to_string(),
                true,
            ))
            .await?;
        tracing::info!("Seeded posts for {}", "maria@example.com");
    }

    tracing::info!("Seed finished");
    Ok(())
}

async fn ensure_professor(
    users: &PostgresUserRepository,
    professors: &PostgresProfessorRepository,
    password_hash: &str,
    name: &str,
    email: &str,
    bio: &str,
    subject: &str,
) -> Result<Professor> {
    if let Some(existing) = users.find_by_email(email).await? {
        let professor = professors
            .find_by_user_id(existing.id)
            .await?
            .context("user exists without a professor profile")?;
        tracing::info!("Professor {email} already present, skipping");
        return Ok(professor);
    }

    let user = User::new(
        email.to_string(),
        password_hash.to_string(),
        name.to_string(),
        Role::Professor,
    );
    let professor = Professor::new(user.id, Some(bio.to_string()), Some(subject.to_string()));
    professors.insert_with_user(&user, &professor).await?;
    tracing::info!("Seeded professor {email}");
    Ok(professor)
}

async fn ensure_student(
    users: &PostgresUserRepository,
    students: &PostgresStudentRepository,
    password_hash: &str,
    name: &str,
    email: &str,
    enrollment: &str,
    grade: &str,
) -> Result<()> {
    if users.find_by_email(email).await?.is_some() {
        tracing::info!("Student {email} already present, skipping");
        return Ok(());
    }

    let user = User::new(
        email.to_string(),
        password_hash.to_string(),
        name.to_string(),
        Role::Student,
    );
    let student = Student::new(user.id, Some(enrollment.to_string()), Some(grade.to_string()));
    students.insert_with_user(&user, &student).await?;
    tracing::info!("Seeded student {email}");
    Ok(())
}
