use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (booking_reference, passenger_name, origin, destination, date, time, flight_class, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            booking.booking_reference,
            booking.passenger_name,
            booking.origin,
            booking.destination,
            booking.date,
            booking.time,
            booking.flight_class,
            booking.status.as_str(),
            booking.created_at.format(TS_FORMAT).to_string(),
            booking.updated_at.format(TS_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_booking(conn: &Connection, reference: &str) -> anyhow::Result<Option<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT booking_reference, passenger_name, origin, destination, date, time, flight_class, status, created_at, updated_at
         FROM bookings WHERE booking_reference = ?1",
    )?;

    let result = stmt.query_row(params![reference], |row| {
        Ok(Booking {
            booking_reference: row.get(0)?,
            passenger_name: row.get(1)?,
            origin: row.get(2)?,
            destination: row.get(3)?,
            date: row.get(4)?,
            time: row.get(5)?,
            flight_class: row.get(6)?,
            status: BookingStatus::parse(&row.get::<_, String>(7)?),
            created_at: parse_ts(&row.get::<_, String>(8)?),
            updated_at: parse_ts(&row.get::<_, String>(9)?),
        })
    });

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    reference: &str,
    status: BookingStatus,
) -> anyhow::Result<()> {
    let now = Utc::now().naive_utc().format(TS_FORMAT).to_string();
    conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE booking_reference = ?3",
        params![status.as_str(), now, reference],
    )?;
    Ok(())
}

/// Moves a booking to a new date/time and marks it RESCHEDULED.
pub fn reschedule_booking(
    conn: &Connection,
    reference: &str,
    new_date: &str,
    new_time: &str,
) -> anyhow::Result<()> {
    let now = Utc::now().naive_utc().format(TS_FORMAT).to_string();
    conn.execute(
        "UPDATE bookings SET date = ?1, time = ?2, status = ?3, updated_at = ?4 WHERE booking_reference = ?5",
        params![
            new_date,
            new_time,
            BookingStatus::Rescheduled.as_str(),
            now,
            reference
        ],
    )?;
    Ok(())
}

fn parse_ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TS_FORMAT).unwrap_or_else(|_| Utc::now().naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn test_booking(reference: &str) -> Booking {
        let now = Utc::now().naive_utc();
        Booking {
            booking_reference: reference.to_string(),
            passenger_name: "Vaishak S".to_string(),
            origin: "BOM".to_string(),
            destination: "BLR".to_string(),
            date: "2025-10-10".to_string(),
            time: "10:30".to_string(),
            flight_class: "Economy".to_string(),
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_and_get() {
        let conn = db::init_db(":memory:").unwrap();
        create_booking(&conn, &test_booking("BK-20251001-aabbccdd")).unwrap();

        let found = get_booking(&conn, "BK-20251001-aabbccdd").unwrap().unwrap();
        assert_eq!(found.passenger_name, "Vaishak S");
        assert_eq!(found.status, BookingStatus::Confirmed);

        assert!(get_booking(&conn, "BK-nope").unwrap().is_none());
    }

    #[test]
    fn test_cancel_and_reschedule_transitions() {
        let conn = db::init_db(":memory:").unwrap();
        create_booking(&conn, &test_booking("BK-20251001-aabbccdd")).unwrap();

        reschedule_booking(&conn, "BK-20251001-aabbccdd", "2025-10-12", "08:00").unwrap();
        let booking = get_booking(&conn, "BK-20251001-aabbccdd").unwrap().unwrap();
        assert_eq!(booking.status, BookingStatus::Rescheduled);
        assert_eq!(booking.date, "2025-10-12");
        assert_eq!(booking.time, "08:00");

        update_booking_status(&conn, "BK-20251001-aabbccdd", BookingStatus::Cancelled).unwrap();
        let booking = get_booking(&conn, "BK-20251001-aabbccdd").unwrap().unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
    }
}
