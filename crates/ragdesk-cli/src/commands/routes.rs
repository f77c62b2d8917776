use colored::Colorize;
use ragdesk_core::route::Route;
use strum::IntoEnumIterator;

pub fn list() {
    for route in Route::iter() {
        let access = if route.is_protected() {
            "sign-in required".yellow()
        } else {
            "public".green()
        };
        println!("{:<16} {:<20} {}", route.path(), route.title(), access);
    }
}
