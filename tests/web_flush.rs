#![cfg(target_arch = "wasm32")]

use hot_dom::{props, web::WebDocument, Child, Descriptor, Error, HotDom, Value};
use std::{cell::Cell, rc::Rc};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

static mut LOG_INITIALIZED: bool = false;

fn hot() -> HotDom<WebDocument> {
	unsafe {
		if !LOG_INITIALIZED {
			tracing_wasm::set_as_global_default();
			LOG_INITIALIZED = true;
		}
	}

	HotDom::new(WebDocument::new(window().unwrap().document().unwrap()))
}

#[wasm_bindgen_test]
fn text_and_style() {
	let hot = hot();
	let div = hot
		.div(Descriptor::new()
			.id("web-text-and-style")
			.computed("style", || Value::Bag(props! { "color" => "blue" }))
			.children(Child::List(vec!["a".into(), "hi".into()])))
		.unwrap();

	assert_eq!(div.tag_name(), "DIV");
	assert_eq!(div.id(), "web-text-and-style");
	let node: &web_sys::Node = div.as_ref();
	assert_eq!(node.text_content().as_deref(), Some("hi"));
	assert_eq!(div.dyn_ref::<HtmlElement>().unwrap().style().get_property_value("color").unwrap(), "blue");
}

#[wasm_bindgen_test]
fn camel_case_style_keys() {
	let hot = hot();
	let div = hot
		.div(Descriptor::new().prop("style", props! { "fontSize" => "12px", "background-color" => "red" }))
		.unwrap();

	let style = div.dyn_ref::<HtmlElement>().unwrap().style();
	assert_eq!(style.get_property_value("font-size").unwrap(), "12px");
	assert_eq!(style.get_property_value("background-color").unwrap(), "red");
}

#[wasm_bindgen_test]
fn click_handler() {
	let hot = hot();
	let clicks = Rc::new(Cell::new(0));
	let button = {
		let clicks = Rc::clone(&clicks);
		hot.button(Descriptor::new().computed("onclick", move || {
			clicks.set(clicks.get() + 1);
			Value::Null
		}))
		.unwrap()
	};
	assert_eq!(hot.document().closure_count(), 1);

	button.dyn_ref::<HtmlElement>().unwrap().click();
	assert_eq!(clicks.get(), 1);
}

#[wasm_bindgen_test]
fn flush_swaps_live_element() {
	let hot = hot();
	let body = hot.document().document().body().unwrap();

	let count = Rc::new(Cell::new(0));
	let counter = {
		let count = Rc::clone(&count);
		hot.span(Descriptor::new().id("web-counter").children(Child::thunk(move || count.get().into()))).unwrap()
	};
	let body_node: &web_sys::Node = body.as_ref();
	body_node.append_child(counter.as_ref()).unwrap();

	count.set(1);
	hot.flush(["web-counter"]).unwrap();

	let live = hot.document().document().get_element_by_id("web-counter").unwrap();
	assert_ne!(live, counter);
	let live_node: &web_sys::Node = live.as_ref();
	assert_eq!(live_node.text_content().as_deref(), Some("1"));

	live.remove();
	assert_eq!(hot.flush(["web-counter"]), Err(Error::LiveNodeNotFound { id: "web-counter".to_owned() }));
}

#[wasm_bindgen_test]
fn flushes_reuse_closures() {
	let hot = hot();
	let body = hot.document().document().body().unwrap();

	let clicks = Rc::new(Cell::new(0));
	let button = {
		let clicks = Rc::clone(&clicks);
		hot.button(Descriptor::new().id("web-reused-handler").computed("onclick", move || {
			clicks.set(clicks.get() + 1);
			Value::Null
		}))
		.unwrap()
	};
	let body_node: &web_sys::Node = body.as_ref();
	body_node.append_child(button.as_ref()).unwrap();
	assert_eq!(hot.document().closure_count(), 1);

	hot.flush(["web-reused-handler"]).unwrap();
	hot.flush(["web-reused-handler"]).unwrap();
	assert_eq!(hot.document().closure_count(), 1);

	let live = hot.document().document().get_element_by_id("web-reused-handler").unwrap();
	live.dyn_ref::<HtmlElement>().unwrap().click();
	assert_eq!(clicks.get(), 1);
	live.remove();
}
