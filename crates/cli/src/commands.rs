use anyhow::{anyhow, bail, Context, Result};
use tablebook_core::{
    input::{format_reservation_time, parse_reservation_time, parse_table_number},
    reservation_details, Reservation, ReservationStore, Table, TableCategory,
};

pub const HELP: &str = "\
Commands:
  tables                                  list every table
  free                                    list unreserved tables
  category <booth|window|outdoor|standard>
  reservations                            list active reservations
  show <table>                            reservation details for a table
  book <table> <YYYY-MM-DD> <HH:MM> <phone> <name...>
  edit <table> <YYYY-MM-DD> <HH:MM> <phone> <name...>
  complete <table>                        mark a reservation complete
  json                                    dump tables and reservations as JSON
  help
  quit";

/// One parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tables,
    Free,
    Category(TableCategory),
    Reservations,
    Show(u32),
    Book(BookingArgs),
    Edit(BookingArgs),
    Complete(u32),
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingArgs {
    pub table: u32,
    pub date: String,
    pub time: String,
    pub phone: String,
    pub name: String,
}

impl Command {
    /// Parse a command line. Returns `None` for blank input.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "tables" | "ls" => Command::Tables,
            "free" => Command::Free,
            "category" => Command::Category(single(&rest, "category")?.parse()?),
            "reservations" => Command::Reservations,
            "show" => Command::Show(parse_table_number(single(&rest, "show")?)?),
            "book" => Command::Book(booking_args(&rest, "book")?),
            "edit" => Command::Edit(booking_args(&rest, "edit")?),
            "complete" => Command::Complete(parse_table_number(single(&rest, "complete")?)?),
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{other}', try 'help'"),
        };
        Ok(Some(command))
    }
}

fn single<'a>(args: &[&'a str], verb: &str) -> Result<&'a str> {
    match args {
        [value] => Ok(*value),
        _ => Err(anyhow!("usage: {verb} <value>")),
    }
}

fn booking_args(args: &[&str], verb: &str) -> Result<BookingArgs> {
    if args.len() < 5 {
        bail!("usage: {verb} <table> <YYYY-MM-DD> <HH:MM> <phone> <name...>");
    }
    Ok(BookingArgs {
        table: parse_table_number(args[0])?,
        date: args[1].to_string(),
        time: args[2].to_string(),
        phone: args[3].to_string(),
        name: args[4..].join(" "),
    })
}

/// Run `command` against the store and return the text to print.
pub fn execute(store: &mut ReservationStore, command: Command) -> Result<String> {
    let output = match command {
        Command::Tables => render_tables(&store.tables()),
        Command::Free => render_tables(&store.available_tables()),
        Command::Category(category) => {
            render_tables(&store.filtered_tables(|table| table.category() == category))
        }
        Command::Reservations => render_reservations(&store.reservations()),
        Command::Show(table) => match store.reservation_for_table(table) {
            Some(reservation) => {
                reservation_details(&reservation, &["name", "phone", "time"])
                    .trim_end()
                    .to_string()
            }
            None => format!("Table {table} is NOT RESERVED."),
        },
        Command::Book(args) => {
            let when = parse_reservation_time(&args.date, &args.time)?;
            let booked = store.book(args.table, &args.name, &args.phone, when)?;
            format!(
                "Booking successful for Table {} at {}.",
                booked.table_number(),
                format_reservation_time(&booked.reservation_time())
            )
        }
        Command::Edit(args) => {
            let when = parse_reservation_time(&args.date, &args.time)?;
            let updated = store
                .reschedule(args.table, &args.name, &args.phone, when)
                .context("failed to update reservation")?;
            format!(
                "Reservation for Table {} updated to {}.",
                updated.table_number(),
                format_reservation_time(&updated.reservation_time())
            )
        }
        Command::Complete(table) => match store.remove_reservation(table) {
            Some(_) => format!("Reservation for Table {table} marked complete."),
            None => format!("Table {table} had no reservation."),
        },
        Command::Json => serde_json::to_string_pretty(&serde_json::json!({
            "tables": store.tables(),
            "reservations": store.reservations(),
        }))
        .context("failed to serialize store snapshot")?,
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(output)
}

fn render_tables(tables: &[Table]) -> String {
    if tables.is_empty() {
        return "No tables.".to_string();
    }
    tables
        .iter()
        .map(Table::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_reservations(reservations: &[Reservation]) -> String {
    if reservations.is_empty() {
        return "No active reservations.".to_string();
    }
    reservations
        .iter()
        .map(|reservation| {
            format!(
                "Table {:>2}  {}  {} ({})",
                reservation.table_number(),
                format_reservation_time(&reservation.reservation_time()),
                reservation.customer_name(),
                reservation.customer_phone()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};
    use tablebook_core::input::{DATE_FORMAT, TIME_FORMAT};

    fn tomorrow() -> (String, String) {
        let when = Local::now().naive_local() + Duration::days(1);
        (
            when.format(DATE_FORMAT).to_string(),
            when.format(TIME_FORMAT).to_string(),
        )
    }

    fn run(store: &mut ReservationStore, line: &str) -> Result<String> {
        let command = Command::parse(line)?.ok_or_else(|| anyhow!("blank line"))?;
        execute(store, command)
    }

    #[test]
    fn parses_booking_with_multi_word_name() -> Result<()> {
        let command = Command::parse("book 4 2030-05-17 19:30 555-0100 Ada Lovelace")?;
        assert_eq!(
            command,
            Some(Command::Book(BookingArgs {
                table: 4,
                date: "2030-05-17".to_string(),
                time: "19:30".to_string(),
                phone: "555-0100".to_string(),
                name: "Ada Lovelace".to_string(),
            }))
        );
        Ok(())
    }

    #[test]
    fn rejects_malformed_commands() -> Result<()> {
        assert_eq!(Command::parse("   ")?, None);
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("show").is_err());
        assert!(Command::parse("show abc").is_err());
        assert!(Command::parse("book 4 2030-05-17 19:30").is_err());
        assert!(Command::parse("category patio").is_err());
        Ok(())
    }

    #[test]
    fn book_show_complete_cycle() -> Result<()> {
        let mut store = ReservationStore::new();
        let (date, time) = tomorrow();

        let out = run(&mut store, &format!("book 2 {date} {time} 555-0100 Alice"))?;
        assert!(out.starts_with("Booking successful for Table 2"));

        let out = run(&mut store, "show 2")?;
        assert!(out.contains("Name: Alice"));
        assert!(out.contains(&format!("Time: {date} {time}")));

        assert!(run(&mut store, &format!("book 2 {date} {time} 555-0101 Bob")).is_err());

        let out = run(&mut store, "free")?;
        assert!(!out.contains("Table 2 "));

        let out = run(&mut store, "complete 2")?;
        assert_eq!(out, "Reservation for Table 2 marked complete.");
        assert_eq!(run(&mut store, "show 2")?, "Table 2 is NOT RESERVED.");
        Ok(())
    }

    #[test]
    fn edit_keeps_original_on_bad_date() -> Result<()> {
        let mut store = ReservationStore::new();
        let (date, time) = tomorrow();
        run(&mut store, &format!("book 6 {date} {time} 555-0100 Alice"))?;

        assert!(run(&mut store, "edit 6 2000-01-01 12:00 555-0100 Alice").is_err());
        assert_eq!(
            store.reservation_for_table(6).map(|r| r.customer_name().to_string()),
            Some("Alice".to_string())
        );
        Ok(())
    }

    #[test]
    fn edit_without_reservation_names_the_table() -> Result<()> {
        let mut store = ReservationStore::new();
        let (date, time) = tomorrow();
        let err = run(&mut store, &format!("edit 9 {date} {time} 555-0100 Alice")).unwrap_err();
        assert!(format!("{err:#}").contains("no active reservation found for table 9"));
        Ok(())
    }

    #[test]
    fn json_snapshot_lists_everything() -> Result<()> {
        let mut store = ReservationStore::new();
        let out = run(&mut store, "json")?;
        let value: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(value["tables"].as_array().map(Vec::len), Some(20));
        assert_eq!(value["reservations"].as_array().map(Vec::len), Some(0));
        Ok(())
    }
}
