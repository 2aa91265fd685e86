use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::model::repository::Notification;

pub fn create_notification(
    for_user: &str,
    from_user: &str,
    entity: &str,
    subject: &str,
    creation: NaiveDateTime,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/notification/create_notification.sql"
    ))?;
    pst.insert(params![for_user, from_user, entity, subject, creation])?;
    Ok(())
}

/// returns the notifications for `user`, newest first
pub fn get_notifications_for_user(
    user: &str,
    con: &Connection,
) -> Result<Vec<Notification>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/notification/get_notifications_for_user.sql"
    ))?;
    let rows = pst.query_map([user], |row| {
        Ok(Notification {
            id: row.get(0)?,
            for_user: row.get(1)?,
            from_user: row.get(2)?,
            entity: row.get(3)?,
            subject: row.get(4)?,
            creation: row.get(5)?,
        })
    })?;
    rows.collect()
}
