use chrono::Utc;
use xcron::{next, parse};

fn main() {
    let title = "Common Cron Expression Patterns";
    println!("{title}");
    println!("{}", "-".repeat(title.len()));
    println!();

    let now = Utc::now();
    println!("Current time: {}", now.format("%Y-%m-%d %H:%M:%S %Z"));
    println!();

    let patterns = vec![
        ("* * * * * ?", "Every second"),
        ("0 */5 * * * ?", "Every 5 minutes"),
        ("0 0 * * * ?", "Every hour (at minute 0)"),
        ("0 0 0 * * ?", "Daily at midnight"),
        ("0 0 2 * * ?", "Daily at 2:00 AM"),
        ("0 0 9 ? * MON-FRI", "Weekdays at 9:00 AM"),
        ("0 0 0 ? * SUN", "Weekly on Sunday at midnight"),
        ("0 0 0 1 * ?", "Monthly on the 1st at midnight"),
        ("0 0 0 1 1 ?", "Yearly on January 1st at midnight"),
        ("0 0 9,17 * * ?", "Daily at 9:00 AM and 5:00 PM"),
        ("0 30 9 ? * MON-FRI", "Weekdays at 9:30 AM"),
        ("0 0 0 L * ?", "Last day of every month"),
        ("0 0 0 LW * ?", "Last weekday of every month"),
        ("0 0 0 15W * ?", "Nearest weekday to the 15th"),
        ("0 0 0 ? * 5L", "Last Friday of every month"),
        ("0 0 0 ? * 1L", "Last Monday of every month"),
        ("0 H H * * ?", "Once an hour, at a deterministic minute"),
        ("0 0 0 H * ?", "Once a month, on a deterministic day"),
    ];

    for (pattern, description) in patterns {
        print_pattern(&now, pattern, description);
    }
}

fn print_pattern(now: &chrono::DateTime<chrono::Utc>, pattern: &str, description: &str) {
    match parse(pattern) {
        Ok(compiled) => match next(&compiled, now) {
            Ok(fire) => {
                println!("{description:<45} {pattern}");
                println!("  Next: {}", fire.format("%Y-%m-%d %H:%M:%S %Z"));
                println!();
            }
            Err(e) => {
                println!("{description:<45} {pattern}");
                println!("  No fire within the search horizon: {e}");
                println!();
            }
        },
        Err(e) => {
            println!("{description:<45} {pattern}");
            println!("  Error: {e}");
            println!();
        }
    }
}
