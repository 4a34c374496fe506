//! Fills a development database with fake accounts, profiles, vacancies and
//! applications.
//!
//! Fake data is generated in parallel with rayon, then written with
//! multi-row `INSERT` statements inside one transaction. Every seeded account
//! uses an email under [`SEED_EMAIL_DOMAIN`] so [`clear_seeded_data`] can
//! remove them again; everything else cascades from the users.

use std::time::Instant;

use acessly_models::{AccessibilityType, CandidacyStatus, DisabilityType, UserRole, VacancyType};
use bcrypt::hash;
use fake::Fake;
use fake::faker::address::en::{CityName, StateAbbr};
use fake::faker::company::en::{CompanyName, Industry};
use fake::faker::job::en::Title;
use fake::faker::lorem::en::{Sentence, Words};
use fake::faker::name::en::Name;
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

pub const SEED_EMAIL_DOMAIN: &str = "seed.acessly.dev";
pub const SEED_PASSWORD: &str = "password123";

// 8 binds per row keeps a batch well under the 65535 parameter limit.
const BATCH_SIZE: usize = 1000;

const SUPPORT_TYPES: &[&str] = &[
    "Sign language interpreter",
    "Screen reader licenses",
    "Accessible workstation",
    "Flexible schedule",
    "Mentoring program",
];

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub companies: usize,
    pub candidates: usize,
    pub vacancies_per_company: usize,
    pub applications_per_candidate: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            companies: 5,
            candidates: 20,
            vacancies_per_company: 3,
            applications_per_candidate: 2,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SeedSummary {
    pub users: usize,
    pub companies: usize,
    pub candidates: usize,
    pub vacancies: usize,
    pub candidacies: usize,
}

struct UserSeed {
    name: String,
    email: String,
    role: UserRole,
    city: String,
    state: String,
}

struct CompanySeed {
    name: String,
    sector: String,
    accessibility_type: AccessibilityType,
    website: String,
    description: String,
}

struct CandidateSeed {
    disability_type: DisabilityType,
    skills: String,
    experience: String,
    required_accessibility: String,
}

struct VacancySeed {
    company_id: i64,
    title: String,
    description: String,
    vacancy_type: VacancyType,
    city: String,
    state: String,
    salary: Decimal,
    accessibility_offered: String,
}

pub async fn seed_database(db: &PgPool, config: SeedConfig) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!(
        "   - {} companies, {} candidates, {} vacancies per company",
        config.companies, config.candidates, config.vacancies_per_company
    );

    // Cost 4 keeps seeding fast; every seeded account shares this hash.
    let password_hash = hash(SEED_PASSWORD, 4)?;

    println!("\n🔧 Generating fake data in parallel...");
    let gen_start = Instant::now();

    let company_users = generate_users(UserRole::Company, config.companies);
    let candidate_users = generate_users(UserRole::Candidate, config.candidates);
    let companies: Vec<CompanySeed> = (0..config.companies)
        .into_par_iter()
        .map(|_| generate_company())
        .collect();
    let candidates: Vec<CandidateSeed> = (0..config.candidates)
        .into_par_iter()
        .map(|_| generate_candidate())
        .collect();

    println!("   ✓ Generated profiles in {:?}", gen_start.elapsed());

    let mut tx = db.begin().await?;

    println!("\n💾 Inserting users and profiles...");
    let company_user_ids = insert_users(&mut tx, &company_users, &password_hash).await?;
    let candidate_user_ids = insert_users(&mut tx, &candidate_users, &password_hash).await?;
    let company_ids = insert_companies(&mut tx, &company_user_ids, &companies).await?;
    let candidate_ids = insert_candidates(&mut tx, &candidate_user_ids, &candidates).await?;
    insert_supports(&mut tx, &company_ids).await?;

    println!("\n📋 Inserting vacancies...");
    let vacancies: Vec<VacancySeed> = company_ids
        .par_iter()
        .flat_map_iter(|&company_id| {
            (0..config.vacancies_per_company).map(move |_| generate_vacancy(company_id))
        })
        .collect();
    let vacancy_ids = insert_vacancies(&mut tx, &vacancies).await?;

    println!("\n📨 Inserting candidacies...");
    let candidacies = insert_candidacies(
        &mut tx,
        &candidate_ids,
        &vacancy_ids,
        config.applications_per_candidate,
    )
    .await?;

    tx.commit().await?;

    let summary = SeedSummary {
        users: company_user_ids.len() + candidate_user_ids.len(),
        companies: company_ids.len(),
        candidates: candidate_ids.len(),
        vacancies: vacancy_ids.len(),
        candidacies,
    };

    println!(
        "\n✅ Seeding complete in {:?}: {} users, {} companies, {} candidates, {} vacancies, {} candidacies",
        start_time.elapsed(),
        summary.users,
        summary.companies,
        summary.candidates,
        summary.vacancies,
        summary.candidacies
    );
    println!("\n📝 Default password for all seeded users: {}", SEED_PASSWORD);

    Ok(summary)
}

/// Removes every seeded account. Profiles, vacancies, supports and
/// candidacies go with them through `ON DELETE CASCADE`.
pub async fn clear_seeded_data(db: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

fn generate_users(role: UserRole, count: usize) -> Vec<UserSeed> {
    let prefix = role.as_str().to_lowercase();

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let name: String = Name().fake();
            let slug: String = name
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_lowercase();

            UserSeed {
                email: format!("{}.{}{}@{}", slug, prefix, idx, SEED_EMAIL_DOMAIN),
                name,
                role,
                city: CityName().fake(),
                state: StateAbbr().fake(),
            }
        })
        .collect()
}

fn generate_company() -> CompanySeed {
    let name: String = CompanyName().fake();
    let domain: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase();

    CompanySeed {
        website: format!("https://{}.example.com", domain),
        name,
        sector: Industry().fake(),
        accessibility_type: pick(AccessibilityType::ALL),
        description: Sentence(6..12).fake(),
    }
}

fn generate_candidate() -> CandidateSeed {
    let skills: Vec<String> = Words(3..6).fake();
    let years = rand::thread_rng().gen_range(0..15);

    CandidateSeed {
        disability_type: pick(DisabilityType::ALL),
        skills: skills.join(", "),
        experience: format!("{} years", years),
        required_accessibility: Sentence(3..6).fake(),
    }
}

fn generate_vacancy(company_id: i64) -> VacancySeed {
    let cents = rand::thread_rng().gen_range(150_000_i64..2_000_000);

    VacancySeed {
        company_id,
        title: Title().fake(),
        description: Sentence(8..16).fake(),
        vacancy_type: pick(VacancyType::ALL),
        city: CityName().fake(),
        state: StateAbbr().fake(),
        salary: Decimal::new(cents, 2),
        accessibility_offered: Sentence(3..6).fake(),
    }
}

fn pick<T: Copy>(values: &[T]) -> T {
    values[rand::thread_rng().gen_range(0..values.len())]
}

async fn insert_users(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
    password_hash: &str,
) -> anyhow::Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO users (name, email, password, role, city, state) ",
        );
        qb.push_values(chunk, |mut row, user| {
            row.push_bind(&user.name)
                .push_bind(&user.email)
                .push_bind(password_hash)
                .push_bind(user.role)
                .push_bind(&user.city)
                .push_bind(&user.state);
        });
        qb.push(" RETURNING id");

        ids.extend(qb.build_query_scalar::<i64>().fetch_all(&mut **tx).await?);
    }

    println!("   ✓ Inserted {} users", ids.len());
    Ok(ids)
}

async fn insert_companies(
    tx: &mut Transaction<'_, Postgres>,
    user_ids: &[i64],
    companies: &[CompanySeed],
) -> anyhow::Result<Vec<i64>> {
    let rows: Vec<_> = user_ids.iter().zip(companies).collect();
    let mut ids = Vec::with_capacity(rows.len());

    for chunk in rows.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO companies (user_id, name, sector, accessibility_type, website, description) ",
        );
        qb.push_values(chunk, |mut row, (user_id, company)| {
            row.push_bind(**user_id)
                .push_bind(&company.name)
                .push_bind(&company.sector)
                .push_bind(company.accessibility_type)
                .push_bind(&company.website)
                .push_bind(&company.description);
        });
        qb.push(" RETURNING id");

        ids.extend(qb.build_query_scalar::<i64>().fetch_all(&mut **tx).await?);
    }

    println!("   ✓ Inserted {} companies", ids.len());
    Ok(ids)
}

async fn insert_candidates(
    tx: &mut Transaction<'_, Postgres>,
    user_ids: &[i64],
    candidates: &[CandidateSeed],
) -> anyhow::Result<Vec<i64>> {
    let rows: Vec<_> = user_ids.iter().zip(candidates).collect();
    let mut ids = Vec::with_capacity(rows.len());

    for chunk in rows.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO candidates (user_id, disability_type, skills, experience, required_accessibility) ",
        );
        qb.push_values(chunk, |mut row, (user_id, candidate)| {
            row.push_bind(**user_id)
                .push_bind(candidate.disability_type)
                .push_bind(&candidate.skills)
                .push_bind(&candidate.experience)
                .push_bind(&candidate.required_accessibility);
        });
        qb.push(" RETURNING id");

        ids.extend(qb.build_query_scalar::<i64>().fetch_all(&mut **tx).await?);
    }

    println!("   ✓ Inserted {} candidates", ids.len());
    Ok(ids)
}

async fn insert_supports(
    tx: &mut Transaction<'_, Postgres>,
    company_ids: &[i64],
) -> anyhow::Result<()> {
    if company_ids.is_empty() {
        return Ok(());
    }

    let mut qb = QueryBuilder::<Postgres>::new(
        "INSERT INTO company_supports (company_id, support_type, description) ",
    );
    qb.push_values(company_ids, |mut row, company_id| {
        let support_type = pick(SUPPORT_TYPES);
        row.push_bind(*company_id)
            .push_bind(support_type)
            .push_bind(format!("{} available on request", support_type));
    });
    qb.build().execute(&mut **tx).await?;

    println!("   ✓ Inserted {} support resources", company_ids.len());
    Ok(())
}

async fn insert_vacancies(
    tx: &mut Transaction<'_, Postgres>,
    vacancies: &[VacancySeed],
) -> anyhow::Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(vacancies.len());

    for chunk in vacancies.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Postgres>::new(
            "INSERT INTO vacancies (company_id, title, description, vacancy_type, city, state, salary, accessibility_offered) ",
        );
        qb.push_values(chunk, |mut row, vacancy| {
            row.push_bind(vacancy.company_id)
                .push_bind(&vacancy.title)
                .push_bind(&vacancy.description)
                .push_bind(vacancy.vacancy_type)
                .push_bind(&vacancy.city)
                .push_bind(&vacancy.state)
                .push_bind(vacancy.salary)
                .push_bind(&vacancy.accessibility_offered);
        });
        qb.push(" RETURNING id");

        ids.extend(qb.build_query_scalar::<i64>().fetch_all(&mut **tx).await?);
    }

    println!("   ✓ Inserted {} vacancies", ids.len());
    Ok(ids)
}

async fn insert_candidacies(
    tx: &mut Transaction<'_, Postgres>,
    candidate_ids: &[i64],
    vacancy_ids: &[i64],
    per_candidate: usize,
) -> anyhow::Result<usize> {
    if vacancy_ids.is_empty() || per_candidate == 0 {
        return Ok(0);
    }

    let pairs: Vec<(i64, i64, CandidacyStatus)> = candidate_ids
        .par_iter()
        .flat_map_iter(|&candidate_id| {
            let mut rng = rand::thread_rng();
            vacancy_ids
                .choose_multiple(&mut rng, per_candidate)
                .map(|&vacancy_id| (candidate_id, vacancy_id, pick(CandidacyStatus::ALL)))
                .collect::<Vec<_>>()
        })
        .collect();

    let mut inserted = 0;
    for chunk in pairs.chunks(BATCH_SIZE) {
        let mut qb =
            QueryBuilder::<Postgres>::new("INSERT INTO candidacies (candidate_id, vacancy_id, status) ");
        qb.push_values(chunk, |mut row, (candidate_id, vacancy_id, status)| {
            row.push_bind(*candidate_id)
                .push_bind(*vacancy_id)
                .push_bind(*status);
        });
        qb.push(" ON CONFLICT (candidate_id, vacancy_id) DO NOTHING");

        let result = qb.build().execute(&mut **tx).await?;
        inserted += result.rows_affected() as usize;
    }

    println!("   ✓ Inserted {} candidacies", inserted);
    Ok(inserted)
}
