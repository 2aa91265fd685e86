#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

use handler::{
    entity_handler::{
        create_folder, delete_entity, download_file, get_entity, move_entity, rename_entity,
        restore_entity, trash_entity, upload_file,
    },
    permission_handler::{
        get_general_access, get_notifications, get_shared_with_list, get_shared_with_me,
    },
    share_handler::{share_entity, unshare_entity},
    user_handler::create_user,
};

use crate::repository::initialize_db;

mod config;
mod guard;
mod handler;
mod hierarchy;
mod logging;
mod model;
mod repository;
mod service;
mod storage;
#[cfg(test)]
mod test;
mod util;

#[launch]
fn rocket() -> Rocket<Build> {
    #[cfg(not(test))]
    logging::init_logger();
    if let Err(e) = initialize_db() {
        panic!("Failed to initialize the database! Error is {e:?}");
    }
    storage::ensure_file_dir();
    rocket::build()
        .mount("/users", routes![create_user])
        .mount(
            "/entities",
            routes![
                create_folder,
                upload_file,
                get_entity,
                download_file,
                move_entity,
                rename_entity,
                trash_entity,
                restore_entity,
                delete_entity,
                share_entity,
                unshare_entity
            ],
        )
        .mount(
            "/permissions",
            routes![
                get_shared_with_list,
                get_shared_with_me,
                get_general_access,
                get_notifications
            ],
        )
}
