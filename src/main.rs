use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use review_scraper_lib::{logger, writer, CategoryRegistry, Crawler, Throttle};

#[derive(Parser, Debug)]
#[command(
    name = "review_scraper",
    about = "Crawls category listings and collects product reviews into a CSV"
)]
struct Args {
    /// Category keys to crawl (default: every registered category)
    #[arg(long, num_args = 0..)]
    categories: Vec<String>,

    /// Max listing pages to walk per category
    #[arg(long, default_value_t = 1)]
    category_pages: u32,

    /// Max review pages to walk per product
    #[arg(long, default_value_t = 1)]
    review_pages: u32,

    /// Output CSV path
    #[arg(long, default_value = "jumia_reviews.csv")]
    output: PathBuf,

    /// Politeness delay between paginated fetches, in seconds
    #[arg(long, default_value_t = 1.0)]
    delay: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    let args = Args::parse();

    let registry = CategoryRegistry::default_catalog();
    let categories: Vec<String> = if args.categories.is_empty() {
        registry.keys().map(str::to_string).collect()
    } else {
        args.categories.clone()
    };

    info!("Crawling categories: {:?}", categories);
    let crawler = Crawler::new(Throttle::from_secs_f64(args.delay));
    let reviews = crawler.crawl_categories(
        &registry,
        &categories,
        args.category_pages,
        args.review_pages,
    )?;

    println!("Fetched {} reviews", reviews.len());
    writer::write_csv(&reviews, &args.output)?;
    println!("Saved reviews to {}", args.output.display());

    Ok(())
}
