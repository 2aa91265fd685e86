use rusqlite::{params, Connection};

use crate::model::repository::User;

/// creates a user record without a root directory. Checking for an existing user must be done by the caller
pub fn create_user(user: &User, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/create_user.sql"))?;
    pst.execute(params![
        user.name,
        user.full_name,
        user.user_image,
        user.password_hash
    ])?;
    Ok(())
}

/// searches for the user with the passed name.
///
/// if `None` is returned, that means there was no match
pub fn get_user(name: &str, con: &Connection) -> Result<Option<User>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/get_user.sql"))?;
    let res = pst.query_row([name], |row| {
        Ok(User {
            name: row.get(0)?,
            full_name: row.get(1)?,
            user_image: row.get(2)?,
            password_hash: row.get(3)?,
            root_directory: row.get(4)?,
        })
    });
    match res {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn set_root_directory(
    user: &str,
    root_directory: &str,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/user/set_root_directory.sql"
    ))?;
    pst.execute(params![root_directory, user])?;
    Ok(())
}
