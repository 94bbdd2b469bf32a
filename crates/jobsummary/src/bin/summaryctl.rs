use jobsummary::db;
use jobsummary::jobs::{JobConfig, JobKey, JobsRepo};
use jobsummary::view::{role_link, PageRequest, SummaryViewModel};
use rand::seq::SliceRandom;
use rand::Rng;
use std::env;

const SEED_ROLES: &[&str] = &["www-data", "ops", "mesos", "analytics", "billing"];
const SEED_ENVIRONMENTS: &[&str] = &["prod", "staging", "devel"];
const SEED_SCHEDULES: &[&str] = &["*/5 * * * *", "0 * * * *", "0 3 * * *"];

fn usage() -> ! {
    eprintln!(
        "summaryctl <command>\n\
         Commands:\n\
         - reset\n\
         - seed <n>\n\
         - add <role> <env> <name> [cron schedule]\n\
         - rm <role> <env> <name>\n\
         - summary [page] [search]\n\
         \n\
         Uses SUMMARY_DATABASE_URL, DATABASE_URL or TEST_DATABASE_URL.\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage();
    }

    let url = env::var("SUMMARY_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .or_else(|_| env::var("TEST_DATABASE_URL"))
        .map_err(|_| {
            anyhow::anyhow!("SUMMARY_DATABASE_URL, DATABASE_URL or TEST_DATABASE_URL must be set")
        })?;

    let pool = db::make_pool(&url).await?;
    db::run_migrations(&pool).await?;
    let repo = JobsRepo::new(pool);

    match args[1].as_str() {
        "reset" => {
            repo.reset().await?;
            println!("reset OK");
        }
        "seed" => {
            let n: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);
            seed(&repo, n).await?;
        }
        "add" => {
            let key = key_from_args(&args)?;
            let schedule = args.get(5).cloned();
            let job = JobConfig::new(key, schedule, 1);
            let id = repo.save_job(&job).await?;
            println!("+ saved {} job {} id={id}", job.kind().as_str(), job.key);
        }
        "rm" => {
            let key = key_from_args(&args)?;
            if repo.remove_job(&key).await? {
                println!("- removed {key}");
            } else {
                println!("no such job {key}");
            }
        }
        "summary" => {
            let page: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);
            let mut request = PageRequest::page(page);
            if let Some(search) = args.get(3) {
                request = request.with_search(search.clone());
            }
            print_summary(&repo, &request).await;
        }
        other => {
            eprintln!("Unknown command: {other}");
            usage();
        }
    }

    Ok(())
}

fn key_from_args(args: &[String]) -> anyhow::Result<JobKey> {
    match (args.get(2), args.get(3), args.get(4)) {
        (Some(role), Some(env), Some(name)) => {
            let key = JobKey::new(role, env, name);
            key.validate()?;
            Ok(key)
        }
        _ => anyhow::bail!("expected <role> <env> <name>"),
    }
}

async fn seed(repo: &JobsRepo, n: usize) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    for i in 0..n {
        let role = SEED_ROLES.choose(&mut rng).copied().unwrap_or("www-data");
        let environment = SEED_ENVIRONMENTS.choose(&mut rng).copied().unwrap_or("prod");
        let key = JobKey::new(role, environment, format!("job-{i}"));

        // roughly one in three seeded jobs is a cron job
        let job = if rng.gen_bool(1.0 / 3.0) {
            let schedule = SEED_SCHEDULES.choose(&mut rng).copied().unwrap_or("0 * * * *");
            JobConfig::cron(key, schedule)
        } else {
            JobConfig::service(key, rng.gen_range(1..=10))
        };

        let id = repo.save_job(&job).await?;
        println!("+ inserted {} job {} id={id}", job.kind().as_str(), job.key);
    }
    Ok(())
}

async fn print_summary(repo: &JobsRepo, request: &PageRequest) {
    let mut view = SummaryViewModel::initialize();
    if let Err(e) = view.load_summaries(repo).await {
        eprintln!("summary load failed ({}): {e}", e.kind());
    }

    let state = view.state();
    println!("=== {} ===", state.title);
    if let Some(banner) = state.error_banner() {
        println!("!! {banner}");
    }

    let page = view.page(request);
    let header: Vec<&str> = state.columns.iter().map(|c| c.label.as_str()).collect();
    println!("{}", header.join(" | "));

    for row in &page.rows {
        let cells: Vec<String> = state
            .columns
            .iter()
            .filter_map(|c| c.cell_text(row))
            .collect();
        println!("{}   ({})", cells.join(" | "), role_link(&row.role));
    }

    println!(
        "page {}/{} ({} roles) pages: {:?}",
        page.page, page.page_count, page.total_items, page.page_links
    );
}
