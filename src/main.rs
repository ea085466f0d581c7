use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{fs, path::PathBuf};
use tracing::{debug, info};

use freightbook::{
    config::{self, Config},
    error::{Error, Result},
    freight::{
        Client,
        models::{ApiShipment, QuoteUser, Role, ScheduleResponse},
    },
    logging,
    quotes::{ColumnFilter, build_api_filters, transform_page},
    schedule::{
        calculate_days_until_departure, format_schedule_date, format_transit_time,
        normalize_schedule_data,
    },
    shipment::{ShipmentDraft, ShipmentStore, from_api_shipment},
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Черновик формы -> документ заявки
    ToApi { draft: PathBuf },

    /// Документ заявки -> черновик формы
    FromApi { document: PathBuf },

    /// Нормализация ответа сервиса расписаний
    Schedule { raw: PathBuf },

    /// Создание заявки и подбор расписаний
    Compare { draft: PathBuf },

    /// Список заявок пользователя
    Quotes {
        #[arg(long, default_value = "")]
        user_id: String,

        #[arg(long)]
        role: Option<String>,

        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        size: u32,

        /// Фильтр колонки в виде id=value
        #[arg(long = "filter", value_parser = parse_column_filter)]
        filters: Vec<ColumnFilter>,
    },
}

fn parse_column_filter(raw: &str) -> std::result::Result<ColumnFilter, String> {
    raw.split_once('=')
        .map(|(id, value)| ColumnFilter::new(id, value))
        .ok_or_else(|| format!("ожидается id=value, получено {raw:?}"))
}

/// Загрузка конфигурации; файл по умолчанию создаётся при первом запуске
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        return config::load_from(path);
    }

    if config::init_if_not()? {
        let full_config_path = std::env::current_dir()?.join(config::CONFIG_PATH);
        println!("Файл конфигурации инициализирован по пути: {full_config_path:?}");
    }

    Ok(config::get()?.clone())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let buf = fs::read(path)?;
    Ok(serde_json::from_slice(&buf)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = load_config(args.config.as_ref())?;
    logging::setup_logging(&cfg.logging.filter)?;

    match args.command {
        Command::ToApi { draft } => {
            let draft: ShipmentDraft = read_json(&draft)?;
            print_json(&ShipmentStore::with_draft(draft).to_api_shipment())?;
        }
        Command::FromApi { document } => {
            let document: ApiShipment = read_json(&document)?;
            print_json(&from_api_shipment(&document))?;
        }
        Command::Schedule { raw } => {
            let schedules = read_json::<ScheduleResponse>(&raw)?.into_vec();
            let normalized: Vec<_> = schedules
                .iter()
                .filter_map(|s| normalize_schedule_data(Some(s)))
                .collect();

            for s in &normalized {
                println!(
                    "{}: отправление {} ({}), в пути {}",
                    s.company.as_deref().unwrap_or("-"),
                    format_schedule_date(s.departure_date.as_deref()).unwrap_or_default(),
                    calculate_days_until_departure(s.departure_date.as_deref())
                        .unwrap_or_default(),
                    format_transit_time(s.transit_time_hours).unwrap_or_default(),
                );
            }
            if cfg.launch_options.verbose {
                print_json(&normalized)?;
            }
        }
        Command::Compare { draft } => {
            let mut store = ShipmentStore::with_draft(read_json(&draft)?);
            let shipment = store.to_api_shipment();
            if cfg.launch_options.verbose {
                print_json(&shipment)?;
            }

            let client = Client::from_config(&cfg)?;
            let outcome = client.submit_compare_options(&shipment).await?;
            info!(
                "Получено расписаний: {} для заявки {:?}",
                outcome.schedule.len(),
                outcome.track_id
            );

            store.set_comparison_results(outcome.comparison_options());
            print_json(&store.draft().comparison_results)?;
        }
        Command::Quotes {
            user_id,
            role,
            page,
            size,
            filters,
        } => {
            if size == 0 {
                return Err(Error::Custom("размер страницы должен быть больше нуля".into()));
            }

            let user = QuoteUser {
                id: user_id,
                role: role.map(Role::new),
            };
            let filter = build_api_filters(&filters);
            debug!("Фильтры поиска: {filter:?}");

            let client = Client::from_config(&cfg)?;
            let response = client.search_quotes(&user, page, size, &filter).await?;
            let list = transform_page(&response, page, size);

            println!(
                "Заявок: {}, страница {} из {}",
                list.pagination.total,
                page + 1,
                list.pagination.total_pages.max(1)
            );
            for q in &list.quotes {
                println!(
                    "{} [{}] {} -> {} ({}, {}) {}",
                    q.track_id, q.status, q.route[0], q.route[1], q.mode, q.cargo_type, q.price
                );
            }
            if cfg.launch_options.verbose {
                print_json(&list)?;
            }
        }
    }

    Ok(())
}
