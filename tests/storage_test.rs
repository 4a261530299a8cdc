//! Repository tests against a real SQLite file with migrations applied
//!
//! Run with: cargo test --test storage_test

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use cardflow::core::profit::{ProfitStatus, ProfitTotals};
use cardflow::core::requisites::Requisite;
use cardflow::core::wizard::UserRef;
use cardflow::storage::{
    create_pool, curators, get_connection, profit_checks, requisites, settings, stop_list, users, DbPool,
};

fn test_pool() -> (TempDir, DbPool) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cardflow.sqlite");
    let pool = create_pool(path.to_str().unwrap(), "123").unwrap();
    (dir, pool)
}

#[test]
fn test_user_registration_and_lookup() {
    let (_dir, pool) = test_pool();
    let conn = get_connection(&pool).unwrap();

    users::add_user(&conn, 100, Some("Ivan_77"), Some("Иван")).unwrap();
    let user = users::get_user(&conn, 100).unwrap().unwrap();
    assert!(!user.registration_complete);

    users::complete_registration(&conn, 100, "yes", "4 часа", "друг").unwrap();
    let user = users::get_user(&conn, 100).unwrap().unwrap();
    assert!(user.registration_complete);
    assert_eq!(user.time_commitment.as_deref(), Some("4 часа"));

    // Second contact refreshes the names but keeps the answers
    users::add_user(&conn, 100, Some("ivan_new"), Some("Иван")).unwrap();
    let user = users::get_user(&conn, 100).unwrap().unwrap();
    assert_eq!(user.username.as_deref(), Some("ivan_new"));
    assert!(user.registration_complete);

    let by_name = users::find_user(&conn, &UserRef::Username("IVAN_NEW".to_string())).unwrap();
    assert_eq!(by_name.map(|u| u.user_id), Some(100));
    assert_eq!(users::get_user_by_username(&conn, "@ivan_new").unwrap().map(|u| u.user_id), Some(100));
    assert!(users::find_user(&conn, &UserRef::Id(999)).unwrap().is_none());
    assert_eq!(users::count_users(&conn).unwrap(), 1);
}

#[test]
fn test_profit_check_is_counted_once() {
    let (_dir, pool) = test_pool();
    let conn = get_connection(&pool).unwrap();
    users::add_user(&conn, 7, Some("worker"), None).unwrap();

    let first = profit_checks::create_profit_check(&conn, 7, 15000, Some("file-1")).unwrap();
    let second = profit_checks::create_profit_check(&conn, 7, 500, None).unwrap();

    let approved = profit_checks::approve_profit_check(&conn, first).unwrap().unwrap();
    assert_eq!(approved.status, ProfitStatus::Approved);
    assert!(approved.processed_at.is_some());

    // Double click on the same check changes nothing
    assert!(profit_checks::approve_profit_check(&conn, first).unwrap().is_none());
    assert!(profit_checks::reject_profit_check(&conn, first).unwrap().is_none());

    let rejected = profit_checks::reject_profit_check(&conn, second).unwrap().unwrap();
    assert_eq!(rejected.status, ProfitStatus::Rejected);

    assert_eq!(
        profit_checks::get_statistics(&conn).unwrap(),
        ProfitTotals { count: 1, amount: 15000 }
    );
    assert_eq!(
        profit_checks::get_user_profit_statistics(&conn, 7).unwrap(),
        ProfitTotals { count: 1, amount: 15000 }
    );
    assert!(profit_checks::approve_profit_check(&conn, 404).unwrap().is_none());
}

#[test]
fn test_requisites_and_stop_list() {
    let (_dir, pool) = test_pool();
    let conn = get_connection(&pool).unwrap();

    let slots = requisites::get_all_requisites(&conn).unwrap();
    assert_eq!(slots.iter().map(|r| r.card_order).collect::<Vec<_>>(), vec![1, 2, 3]);

    let card = Requisite {
        card_order: 2,
        card_number: "2200 7001 2345 6789".to_string(),
        card_name: "Иван И.".to_string(),
        bank_name: "Т-Банк".to_string(),
        min_amount: 1000,
        max_amount: 50000,
        percentage: 80,
    };
    requisites::update_requisite(&conn, &card).unwrap();
    assert_eq!(requisites::get_requisite_by_order(&conn, 2).unwrap(), Some(card));
    assert_eq!(requisites::get_card_order_by_number(&conn, "2200700123456789").unwrap(), Some(2));

    assert!(stop_list::add_stopped_card(&conn, " 2200 7001 2345 6789 ").unwrap());
    assert!(!stop_list::add_stopped_card(&conn, "2200 7001 2345 6789").unwrap());
    assert_eq!(stop_list::get_stopped_cards(&conn).unwrap(), vec!["2200 7001 2345 6789".to_string()]);
    assert!(stop_list::remove_stopped_card(&conn, "2200 7001 2345 6789").unwrap());
    assert!(!stop_list::remove_stopped_card(&conn, "2200 7001 2345 6789").unwrap());
}

#[test]
fn test_admin_settings() {
    let (_dir, pool) = test_pool();
    let conn = get_connection(&pool).unwrap();

    assert_eq!(settings::get_admin_password(&conn, "123").unwrap(), "123");
    settings::update_admin_password(&conn, "s3cret").unwrap();
    assert_eq!(settings::get_admin_password(&conn, "123").unwrap(), "s3cret");

    assert_eq!(settings::get_personal_requisites_link(&conn).unwrap(), None);
    settings::update_personal_requisites_link(&conn, Some("https://t.me/owner")).unwrap();
    assert_eq!(
        settings::get_personal_requisites_link(&conn).unwrap().as_deref(),
        Some("https://t.me/owner")
    );
    settings::update_personal_requisites_link(&conn, None).unwrap();
    assert_eq!(settings::get_personal_requisites_link(&conn).unwrap(), None);
}

#[test]
fn test_curators_and_students() {
    let (_dir, pool) = test_pool();
    let conn = get_connection(&pool).unwrap();
    users::add_user(&conn, 1, Some("mentor"), None).unwrap();
    users::add_user(&conn, 2, Some("newbie"), None).unwrap();

    curators::add_curator(&conn, 1, "@mentor").unwrap();
    assert!(curators::is_curator(&conn, 1).unwrap());
    assert_eq!(curators::get_curators(&conn).unwrap()[0].username, "mentor");

    users::set_user_curator(&conn, 2, Some(1)).unwrap();
    assert_eq!(users::get_user_curator(&conn, 2).unwrap().as_deref(), Some("mentor"));
    let students = users::get_students(&conn, 1).unwrap();
    assert_eq!(students.iter().map(|u| u.user_id).collect::<Vec<_>>(), vec![2]);

    assert!(curators::remove_curator(&conn, "MENTOR").unwrap());
    assert!(!curators::remove_curator(&conn, "mentor").unwrap());
    assert!(curators::get_curator(&conn, 1).unwrap().is_none());
    assert_eq!(users::get_user_curator(&conn, 2).unwrap(), None);
}

#[test]
fn test_curator_username_taken_over_by_another_user() {
    let (_dir, pool) = test_pool();
    let conn = get_connection(&pool).unwrap();
    users::add_user(&conn, 1, Some("bob"), None).unwrap();
    curators::add_curator(&conn, 1, "bob").unwrap();

    // User 1 renames and user 2 picks up the freed username
    users::add_user(&conn, 1, Some("alice"), None).unwrap();
    users::add_user(&conn, 2, Some("bob"), None).unwrap();
    users::add_user(&conn, 3, Some("student"), None).unwrap();
    users::set_user_curator(&conn, 3, Some(1)).unwrap();

    curators::add_curator(&conn, 2, "@Bob").unwrap();

    let list = curators::get_curators(&conn).unwrap();
    assert_eq!(list.iter().map(|c| c.user_id).collect::<Vec<_>>(), vec![2]);
    assert!(!curators::is_curator(&conn, 1).unwrap());
    assert_eq!(users::get_user_curator(&conn, 3).unwrap(), None);

    // Re-adding the old curator under the new name works as usual
    curators::add_curator(&conn, 1, "alice").unwrap();
    assert_eq!(curators::get_curators(&conn).unwrap().len(), 2);
}

#[test]
fn test_staff_shifts_and_bans() {
    let (_dir, pool) = test_pool();
    let conn = get_connection(&pool).unwrap();
    users::add_user(&conn, 5, Some("dealer"), None).unwrap();

    assert_eq!(users::toggle_shift(&conn, 5).unwrap(), None);
    assert!(users::set_staff(&conn, 5, "менеджер").unwrap());
    assert!(!users::set_staff(&conn, 6, "менеджер").unwrap());

    assert_eq!(users::toggle_shift(&conn, 5).unwrap(), Some(true));
    assert_eq!(users::toggle_shift(&conn, 5).unwrap(), Some(false));
    assert_eq!(users::get_staff(&conn).unwrap().len(), 1);

    assert!(users::clear_staff(&conn, 5).unwrap());
    assert!(!users::clear_staff(&conn, 5).unwrap());
    assert!(users::get_staff(&conn).unwrap().is_empty());

    assert!(!users::is_banned(&conn, 5).unwrap());
    assert!(!users::is_banned(&conn, 404).unwrap());
    users::set_banned(&conn, 5, true).unwrap();
    assert!(users::is_banned(&conn, 5).unwrap());
    assert_eq!(users::get_banned_users(&conn).unwrap().len(), 1);
    users::set_banned(&conn, 5, false).unwrap();
    assert!(users::get_banned_users(&conn).unwrap().is_empty());
}
