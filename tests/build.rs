use hot_dom::{memory::MemoryDocument, props, render::render, Child, Descriptor, Document, Error, HotDom, Value, DEFAULT_DEPTH_LIMIT};
use std::{cell::Cell, rc::Rc};

fn init_logging() {
	let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::TRACE).try_init();
}

#[test]
fn empty() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let document = hot.document();

	let div = hot.tag("div").build(None::<&str>).unwrap();
	assert_eq!(document.tag_name(div), Some("div".to_owned()));
	assert!(document.children(div).is_empty());
	assert!(document.properties(div).is_empty());
	assert_eq!(document.parent(div), None);

	let span = hot.tag("span").empty().unwrap();
	assert_eq!(document.outer_html(span), "<span></span>");
}

#[test]
fn primitive_is_text_only() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let document = hot.document();

	let p = hot.p("Hello hot-dom!").unwrap();
	assert_eq!(document.outer_html(p), "<p>Hello hot-dom!</p>");

	let number = hot.span(1.5).unwrap();
	assert_eq!(document.text_content(number), "1.5");

	let whole = hot.span(2.0).unwrap();
	assert_eq!(document.text_content(whole), "2");

	assert_eq!(hot.registry_len(), 0);
}

#[test]
fn any_tag_name() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let custom = hot.tag("my-widget").build("x").unwrap();
	assert_eq!(hot.document().outer_html(custom), "<my-widget>x</my-widget>");
	assert_eq!(hot.tag("my-widget").name(), "my-widget");
}

#[test]
fn invalid_tag_name() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	match hot.build("not a tag", None::<&str>) {
		Err(Error::CreateElement { tag, .. }) => assert_eq!(tag, "not a tag"),
		other => panic!("Expected `CreateElement` error but got {:?}", other),
	}
}

#[test]
fn descriptor_properties_and_children() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let document = hot.document();

	let item = hot.li("first").unwrap();
	let list = hot
		.ul(Descriptor::new()
			.prop("className", "items")
			.prop("title", "A list")
			.children(Child::List(vec![Child::Node(item), Child::Node(hot.li("second").unwrap())])))
		.unwrap();

	assert_eq!(document.outer_html(list), r#"<ul class="items" title="A list"><li>first</li><li>second</li></ul>"#);
	assert_eq!(document.parent(item), Some(list));
	// Not identified.
	assert_eq!(hot.registry_len(), 0);
}

#[test]
fn text_overwrites_earlier_content() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let document = hot.document();

	let letters = hot.div(Child::list(vec!["a", "b", "c"])).unwrap();
	assert_eq!(document.text_content(letters), "c");
	assert_eq!(document.children(letters).len(), 1);

	let span = hot.span("erased").unwrap();
	let mixed = hot.div(Child::List(vec![Child::Node(span), Child::Text("last".to_owned())])).unwrap();
	assert_eq!(document.outer_html(mixed), "<div>last</div>");
	assert_eq!(document.parent(span), None);
}

#[test]
fn thunks_are_evaluated_at_build_time() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let document = hot.document();

	let calls = Rc::new(Cell::new(0));
	let thunk = {
		let calls = Rc::clone(&calls);
		Child::thunk(move || {
			calls.set(calls.get() + 1);
			Child::List(vec![Child::thunk(|| "nested".into())])
		})
	};
	assert_eq!(calls.get(), 0);

	let div = hot.div(thunk).unwrap();
	assert_eq!(calls.get(), 1);
	assert_eq!(document.text_content(div), "nested");
}

#[test]
fn thunks_can_build_nested_elements() {
	init_logging();
	let hot = Rc::new(HotDom::new(MemoryDocument::new()));

	let section = {
		let inner = Rc::clone(&hot);
		hot.section(Descriptor::new().id("outer").children(Child::thunk(move || inner.h1("Title").map_or_else(|_| Child::empty(), Child::Node))))
			.unwrap()
	};

	assert_eq!(hot.document().outer_html(section), r#"<section id="outer"><h1>Title</h1></section>"#);
	assert!(hot.registered("outer").is_some());
}

#[test]
fn descriptor_child_renders_its_children_only() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let document = hot.document();

	let placeholder = Descriptor::new().id("ignored").prop("title", "ignored").children("inner");
	let div = hot.div(Descriptor::new().children(Child::from(placeholder))).unwrap();

	assert_eq!(document.outer_html(div), "<div>inner</div>");
	assert!(hot.registered("ignored").is_none());
}

#[test]
fn append_failures_are_skipped() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let document = hot.document();

	let outer = hot.div(None::<&str>).unwrap();
	let inner = hot.div(None::<&str>).unwrap();
	document.append_child(&outer, &inner).unwrap();
	let sibling = hot.span(None::<&str>).unwrap();

	// `outer` can't become a child of its own descendant.
	render(document, &Child::List(vec![Child::Node(outer), Child::Node(sibling)]), &inner, DEFAULT_DEPTH_LIMIT);
	assert_eq!(document.children(inner), vec![sibling]);
	assert_eq!(document.parent(outer), None);
}

#[test]
fn depth_limit_drops_deep_content() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new()).with_depth_limit(2);
	let document = hot.document();

	let shallow = hot.div(Child::list(vec!["fits"])).unwrap();
	assert_eq!(document.text_content(shallow), "fits");

	let deep = hot.div(Child::List(vec![Child::List(vec!["too deep".into()])])).unwrap();
	assert_eq!(document.text_content(deep), "");
}

#[test]
fn end_to_end_build() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let document = hot.document();

	let descriptor = Descriptor::new()
		.id("x")
		.computed("style", || Value::Bag(props! { "color" => "blue" }))
		.children(Child::list(vec!["hi"]));
	let div = hot.div(descriptor).unwrap();

	assert_eq!(document.tag_name(div), Some("div".to_owned()));
	assert_eq!(document.text_content(div), "hi");
	assert_eq!(document.property(div, "style"), Some(Value::Bag(props! { "color" => "blue" })));

	let entry = hot.registered("x").unwrap();
	assert_eq!(&*entry.tag, "div");
	assert_eq!(entry.descriptor.identifier().as_deref(), Some("x"));
	assert!(matches!(entry.descriptor.props["style"], Value::Computed(_)));
}

#[test]
fn children_stay_off_the_node() {
	init_logging();
	let hot = HotDom::new(MemoryDocument::new());
	let document = hot.document();

	let div = hot.div(Descriptor::new().id("kept").children("text")).unwrap();
	assert_eq!(document.property(div, "children"), None);
	assert_eq!(document.outer_html(div), r#"<div id="kept">text</div>"#);

	let entry = hot.registered("kept").unwrap();
	assert!(matches!(&entry.descriptor.children, Child::Text(text) if text == "text"));
}
