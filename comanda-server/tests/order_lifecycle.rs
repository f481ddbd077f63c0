//! End-to-end order lifecycle: POS producer -> store -> kitchen consumer
//!
//! Drives the real services against an on-disk redb database, the way the
//! deployed server wires them.

use std::sync::Arc;

use comanda_server::kitchen::KitchenBoard;
use comanda_server::pos::{Catalog, FloorPlan, PadService, PadStatus, PaymentInput};
use comanda_server::store::TicketStore;
use shared::models::{PaymentMethod, TicketStatus};

struct Fixture {
    _dir: tempfile::TempDir,
    store: TicketStore,
    pads: PadService,
    board: KitchenBoard,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = TicketStore::open(dir.path().join("comanda.redb")).unwrap();
    let pads = PadService::new(
        store.clone(),
        Arc::new(FloorPlan::seeded()),
        Arc::new(Catalog::seeded()),
    );
    let board = KitchenBoard::new(store.clone());
    Fixture {
        _dir: dir,
        store,
        pads,
        board,
    }
}

#[test]
fn happy_path_send_prepare_serve() {
    let fx = fixture();

    // Waiter builds the comanda: table 5, two paellas on one line
    let pad = fx.pads.open_pad("María García");
    fx.pads.select_table(&pad.pad_id, "5").unwrap();
    fx.pads.add_item(&pad.pad_id, "main1").unwrap();
    fx.pads.add_item(&pad.pad_id, "main1").unwrap();
    let ticket = fx.pads.send(&pad.pad_id).unwrap();

    // Exactly one SENT ticket in the store
    let stored = fx.store.list_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, TicketStatus::Sent);
    assert_eq!(stored[0].items[0].quantity, 2);

    // The kitchen polls and sees it; the per-category constant applies once
    // per line, so two paellas estimate 15 minutes
    fx.board.refresh().unwrap();
    let entry = fx.board.find(&ticket.id).unwrap();
    assert_eq!(entry.estimated_minutes, 15);
    assert_eq!(entry.elapsed_minutes, 0);

    // Kitchen advances it
    fx.board
        .set_status(&ticket.id, TicketStatus::Preparing)
        .unwrap();
    fx.board.set_status(&ticket.id, TicketStatus::Ready).unwrap();

    // Waiter polls, sees READY, serves
    let view = fx.pads.refresh(&pad.pad_id).unwrap();
    assert_eq!(view.status, PadStatus::Ready);
    fx.pads.mark_served(&pad.pad_id).unwrap();

    // Served tickets drop off the active board on the next tick
    fx.board.refresh().unwrap();
    assert!(fx.board.entries().is_empty());
    assert_eq!(
        fx.store.find(&ticket.id).unwrap().unwrap().status,
        TicketStatus::Served
    );
}

#[test]
fn started_at_survives_ready_and_revert() {
    let fx = fixture();
    let pad = fx.pads.open_pad("María García");
    fx.pads.select_table(&pad.pad_id, "1").unwrap();
    fx.pads.add_item(&pad.pad_id, "app1").unwrap();
    let ticket = fx.pads.send(&pad.pad_id).unwrap();

    fx.board.refresh().unwrap();
    let prepared = fx
        .board
        .set_status(&ticket.id, TicketStatus::Preparing)
        .unwrap();
    let started = prepared.started_at;
    assert!(started.is_some());

    // Revert to pending: started_at stays
    let reverted = fx.board.set_status(&ticket.id, TicketStatus::Sent).unwrap();
    assert_eq!(reverted.started_at, started);

    // Restart and finish: still the original instant
    let again = fx
        .board
        .set_status(&ticket.id, TicketStatus::Preparing)
        .unwrap();
    assert_eq!(again.started_at, started);
    let ready = fx.board.set_status(&ticket.id, TicketStatus::Ready).unwrap();
    assert_eq!(ready.started_at, started);
}

#[test]
fn empty_send_is_a_store_noop() {
    let fx = fixture();
    let pad = fx.pads.open_pad("María García");
    fx.pads.select_table(&pad.pad_id, "3").unwrap();

    assert!(fx.pads.send(&pad.pad_id).is_err());
    assert!(fx.store.list_all().unwrap().is_empty());
}

#[test]
fn bulk_ready_clears_the_preparing_column() {
    let fx = fixture();

    for table in ["1", "3", "6"] {
        let pad = fx.pads.open_pad("María García");
        fx.pads.select_table(&pad.pad_id, table).unwrap();
        fx.pads.add_item(&pad.pad_id, "main2").unwrap();
        let ticket = fx.pads.send(&pad.pad_id).unwrap();
        fx.store
            .upsert_status(&ticket.id, TicketStatus::Preparing)
            .unwrap();
    }

    fx.board.refresh().unwrap();
    assert_eq!(fx.board.stats().preparing, 3);

    let updated = fx.board.mark_all_ready().unwrap();
    assert_eq!(updated.len(), 3);
    assert_eq!(fx.board.stats().preparing, 0);
    assert_eq!(fx.board.stats().ready, 3);
}

#[test]
fn consumer_view_is_stale_until_next_poll() {
    let fx = fixture();
    fx.board.refresh().unwrap();

    let pad = fx.pads.open_pad("María García");
    fx.pads.select_table(&pad.pad_id, "8").unwrap();
    fx.pads.add_item(&pad.pad_id, "des1").unwrap();
    fx.pads.send(&pad.pad_id).unwrap();

    // Appended after the board's last tick: not visible yet
    assert!(fx.board.entries().is_empty());

    fx.board.refresh().unwrap();
    assert_eq!(fx.board.entries().len(), 1);
}

#[test]
fn tickets_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("comanda.redb");

    let ticket_id = {
        let store = TicketStore::open(&db_path).unwrap();
        let pads = PadService::new(
            store.clone(),
            Arc::new(FloorPlan::seeded()),
            Arc::new(Catalog::seeded()),
        );
        let pad = pads.open_pad("María García");
        pads.select_table(&pad.pad_id, "9").unwrap();
        pads.add_item(&pad.pad_id, "bev1").unwrap();
        pads.send(&pad.pad_id).unwrap().id
    };

    // Reopen the database as a fresh process would
    let store = TicketStore::open(&db_path).unwrap();
    let ticket = store.find(&ticket_id).unwrap().unwrap();
    assert_eq!(ticket.status, TicketStatus::Sent);
    assert_eq!(ticket.table.number, "9");
}

#[test]
fn cashier_hold_recall_and_payment() {
    let fx = fixture();
    let pad = fx.pads.open_pad("Juan Cajero");
    fx.pads.add_item(&pad.pad_id, "main1").unwrap();

    // Suspend, serve someone else, recall
    fx.pads.hold(&pad.pad_id).unwrap();
    assert_eq!(fx.store.list_held().unwrap().len(), 1);
    let view = fx.pads.recall(&pad.pad_id).unwrap();
    assert_eq!(view.items.len(), 1);

    // 18.00 + 21% IVA = 21.78
    let completed = fx
        .pads
        .process_payment(
            &pad.pad_id,
            &PaymentInput {
                method: PaymentMethod::Cash,
                tendered: Some(25.0),
                card_number: None,
            },
        )
        .unwrap();
    assert_eq!(completed.total, 21.78);
    assert_eq!(completed.payment.change, Some(3.22));

    let recorded = fx.store.list_completed().unwrap();
    assert_eq!(recorded.len(), 1);
}
