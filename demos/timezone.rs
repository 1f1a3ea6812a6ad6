use chrono::Utc;
use chrono_tz::{America::New_York, Asia::Tokyo, Europe::London, US::Pacific};
use xcron::{next, parse};

fn main() {
    let cron_expr = "0 0 9 ? * MON-FRI"; // Every weekday at 9:00 AM

    println!("Cron expression: {cron_expr} (Every weekday at 9:00 AM)");
    println!();

    let compiled = parse(cron_expr).expect("valid cron expression");

    let utc_now = Utc::now();
    println!(
        "Current UTC time: {}",
        utc_now.format("%Y-%m-%d %H:%M:%S %Z")
    );
    println!();

    println!("Next execution time in different timezones:");
    println!("--------------------------------------------------------");

    print_next(&compiled, "UTC", &utc_now, false);

    let pacific_now = utc_now.with_timezone(&Pacific);
    print_next(&compiled, "US/Pacific", &pacific_now, true);

    let ny_now = utc_now.with_timezone(&New_York);
    print_next(&compiled, "America/New_York", &ny_now, true);

    let london_now = utc_now.with_timezone(&London);
    print_next(&compiled, "Europe/London", &london_now, true);

    let tokyo_now = utc_now.with_timezone(&Tokyo);
    print_next(&compiled, "Asia/Tokyo", &tokyo_now, true);

    println!();
    println!("Note: the same compiled expression produces different absolute times");
    println!("depending on the timezone, but represents the same local time.");
}

fn print_next<TZ: chrono::TimeZone>(
    compiled: &xcron::CompiledExpr,
    label: &str,
    now: &chrono::DateTime<TZ>,
    also_print_utc: bool,
) where
    TZ::Offset: std::fmt::Display,
{
    match next(compiled, now) {
        Ok(fire) => {
            println!("{label:<16} {}", fire.format("%Y-%m-%d %H:%M:%S %Z"));
            if also_print_utc {
                println!(
                    "{:16} (UTC: {})",
                    "",
                    fire.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S %Z")
                );
            }
        }
        Err(e) => println!("{label:<16} Error: {e}"),
    }
}
