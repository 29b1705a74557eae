// Browser smoke tests; run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> web_sys::Element {
    let doc = web_sys::window().unwrap().document().unwrap();
    let host = doc.create_element("div").unwrap();
    host.set_attribute("style", "width:400px;height:300px").unwrap();
    let canvas = doc.create_element("canvas").unwrap();
    canvas.set_id(id);
    host.append_child(&canvas).unwrap();
    doc.body().unwrap().append_child(&host).unwrap();
    host
}

fn canvas(id: &str) -> web_sys::HtmlCanvasElement {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into()
        .unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn radar_mounts_sizes_and_unmounts() {
    add_canvas("radar-test");
    folio_widgets::mount_radar("radar-test").unwrap();
    let canvas = canvas("radar-test");
    assert_eq!(canvas.width(), 400);
    assert_eq!(canvas.height(), 300);
    assert!(folio_widgets::unmount_radar());
    assert!(!folio_widgets::unmount_radar());
}

#[wasm_bindgen_test]
async fn radar_follows_container_without_window_resize() {
    let host = add_canvas("radar-reflow");
    folio_widgets::mount_radar("radar-reflow").unwrap();
    assert_eq!(canvas("radar-reflow").width(), 400);

    host.set_attribute("style", "width:520px;height:260px").unwrap();
    sleep(100).await;
    assert_eq!(canvas("radar-reflow").width(), 520);
    assert_eq!(canvas("radar-reflow").height(), 260);

    assert!(folio_widgets::unmount_radar());
    host.set_attribute("style", "width:300px;height:200px").unwrap();
    sleep(100).await;
    assert_eq!(canvas("radar-reflow").width(), 520);
}

#[wasm_bindgen_test]
fn game_start_end_cycle() {
    add_canvas("game-test");
    folio_widgets::mount_game("game-test").unwrap();
    assert!(folio_widgets::start_game().unwrap());
    assert!(!folio_widgets::start_game().unwrap());
    let snap = folio_widgets::game_snapshot().unwrap();
    assert!(snap.contains("\"phase\":\"running\""));
    assert!(folio_widgets::end_game().unwrap());
    assert!(folio_widgets::unmount_game());
    assert!(folio_widgets::start_game().is_err());
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(folio_widgets::mount_radar("does-not-exist").is_err());
    assert!(!folio_widgets::unmount_radar());
    assert!(folio_widgets::mount_game("does-not-exist").is_err());
    assert!(folio_widgets::start_game().is_err());
    assert!(!folio_widgets::unmount_game());
}
