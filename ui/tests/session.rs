//! Drives a full terminal session against a live server.

use todo_core::{Filter, TodoClient};
use todo_ui::{App, AppError, UreqTransport};

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let store = todo_server::TodoStore::open_in_memory().unwrap();
            todo_server::run(listener, store).await
        })
        .unwrap();
    });

    addr
}

fn app(addr: std::net::SocketAddr) -> App<UreqTransport> {
    App::new(TodoClient::new(&format!("http://{addr}")), UreqTransport::new())
}

#[test]
fn actions_reconcile_with_server() {
    let addr = start_server();
    let mut app = app(addr);
    app.refresh().unwrap();
    assert!(app.view().todos().is_empty());

    app.add("Buy milk".to_string(), None).unwrap();
    app.add("Walk dog".to_string(), Some("Around the park".to_string()))
        .unwrap();
    let ids: Vec<i64> = app.view().todos().iter().map(|t| t.id).collect();
    let (dog, milk) = (ids[0], ids[1]);

    app.toggle(milk).unwrap();
    assert!(app.view().find(milk).unwrap().completed);

    app.edit(dog, "Walk cat".to_string(), Some(String::new()))
        .unwrap();
    let cat = app.view().find(dog).unwrap();
    assert_eq!(cat.title, "Walk cat");
    assert!(cat.description.is_none());
    assert!(cat.was_updated());

    // A second session sees the same state, in the same order.
    let mut other = self::app(addr);
    other.refresh().unwrap();
    assert_eq!(other.view().todos(), app.view().todos());

    assert!(other.delete(milk).unwrap());
    assert!(!app.delete(milk).unwrap());
    assert_eq!(app.view().todos().len(), 1);

    let mut view_filter = self::app(addr);
    view_filter.refresh().unwrap();
    view_filter
        .handle(todo_ui::Command::Filter(Filter::Completed))
        .unwrap();
    assert_eq!(
        view_filter.view().empty_message(),
        Some("No completed tasks yet!")
    );
}

#[test]
fn scripted_session_output() {
    let addr = start_server();
    let mut app = app(addr);
    let input = b"add Buy milk :: two litres\nlist\ntoggle 1\nedit 1 Buy oat milk\nfilter active\nquit\n"
        .as_slice();
    let mut out = Vec::new();

    app.run(input, &mut out).unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("[ ] #1 Buy milk"));
    assert!(out.contains("two litres"));
    assert!(out.contains("[x] #1 Buy oat milk"));
    assert!(out.contains("All tasks completed! Great job!"));
}

#[test]
fn unreachable_server_is_reported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut app = app(addr);
    let err = app.refresh().unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
    assert!(app.view().todos().is_empty());
}
