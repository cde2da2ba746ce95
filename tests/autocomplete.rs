use instant_suggest::terminal::{KeyCode, KeyEvent, PointerEvent};
use instant_suggest::{
    Autocomplete, AutocompleteConfig, AutocompleteEvent, Candidate, ConfigError, HostEffect,
    Interactive, KeyAction, KeyBindings, LookupResponse, PendingLookup, SuggestionSource,
};
use instant_suggest::runtime::KeyBinding;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn labeled(labels: &[&str]) -> Vec<Candidate> {
    labels
        .iter()
        .map(|label| Candidate::labeled("label", *label))
        .collect()
}

fn fruit() -> Vec<Candidate> {
    labeled(&["Apple", "Apricot", "Avocado", "Banana"])
}

fn widget_with(config: AutocompleteConfig) -> Autocomplete {
    Autocomplete::new(config, fruit().into(), "").expect("valid config")
}

fn widget() -> Autocomplete {
    widget_with(AutocompleteConfig::new("label"))
}

fn type_text(widget: &mut Autocomplete, text: &str) -> Vec<AutocompleteEvent> {
    let mut events = Vec::new();
    for ch in text.chars() {
        events.extend(widget.on_key(KeyEvent::plain(KeyCode::Char(ch))).events);
    }
    events
}

fn press(widget: &mut Autocomplete, code: KeyCode) -> instant_suggest::InteractionResult {
    widget.on_key(KeyEvent::plain(code))
}

fn fruit_named(label: &str) -> Option<Candidate> {
    Some(Candidate::labeled("label", label))
}

#[test]
fn typing_prefix_lists_matches_in_source_order() {
    let mut widget = widget();
    let events = type_text(&mut widget, "ap");

    assert_eq!(widget.visible_labels(), vec!["Apple", "Apricot"]);
    assert_eq!(widget.highlighted_index(), 0);
    assert_eq!(widget.placeholder(), Some("apple"));
    assert!(widget.shows_list());
    assert_eq!(
        events,
        vec![
            AutocompleteEvent::Input("a".to_string()),
            AutocompleteEvent::Input("ap".to_string()),
        ]
    );
}

#[test]
fn custom_bindings_replace_defaults() {
    let mut bindings = KeyBindings::new();
    bindings.bind(KeyBinding::key(KeyCode::Tab), KeyAction::ArrowDown);
    let mut widget = widget().with_key_bindings(bindings);
    type_text(&mut widget, "ap");

    press(&mut widget, KeyCode::Tab);
    assert_eq!(widget.highlighted_index(), 1);
    assert_eq!(widget.text(), "Apricot");
}

#[test]
fn exact_label_is_selected_and_single_match_hides_list() {
    let mut widget = widget();
    let result = widget.set_text("Banana");

    assert_eq!(widget.chosen(), fruit_named("Banana").as_ref());
    assert!(!widget.shows_list());
    assert_eq!(
        result.events,
        vec![
            AutocompleteEvent::Input("Banana".to_string()),
            AutocompleteEvent::Selected(fruit_named("Banana")),
            AutocompleteEvent::Input("Banana".to_string()),
        ]
    );
}

#[test]
fn exact_label_among_several_keeps_list_open() {
    let source = labeled(&["Apple", "Apple pie", "Banana"]);
    let mut widget =
        Autocomplete::new(AutocompleteConfig::new("label"), source.into(), "").expect("valid");
    widget.set_text("Apple");

    assert_eq!(widget.visible_labels(), vec!["Apple", "Apple pie"]);
    assert_eq!(widget.chosen(), fruit_named("Apple").as_ref());
    assert!(widget.shows_list());
}

#[test]
fn exact_selection_can_be_disabled() {
    let mut widget = widget_with(AutocompleteConfig::new("label").with_select_on_exact(false));
    let result = widget.set_text("Banana");

    assert!(widget.chosen().is_none());
    assert!(widget.shows_list());
    assert_eq!(
        result.events,
        vec![AutocompleteEvent::Input("Banana".to_string())]
    );
}

#[test]
fn arrow_down_moves_highlight_and_fills_text() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    let result = press(&mut widget, KeyCode::Down);

    assert_eq!(widget.highlighted_index(), 1);
    assert_eq!(widget.text(), "Apricot");
    assert_eq!(widget.chosen(), fruit_named("Apricot").as_ref());
    assert_eq!(
        result.effects,
        vec![HostEffect::ScrollIntoView {
            index: 1,
            align_top: false
        }]
    );
    assert_eq!(
        result.events.last(),
        Some(&AutocompleteEvent::KeyDown(fruit_named("Apricot")))
    );
}

#[test]
fn arrow_down_on_last_candidate_does_nothing() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    press(&mut widget, KeyCode::Down);
    let result = press(&mut widget, KeyCode::Down);

    assert_eq!(widget.highlighted_index(), 1);
    assert_eq!(widget.text(), "Apricot");
    assert!(result.effects.is_empty());
    assert!(
        !result
            .events
            .iter()
            .any(|event| matches!(event, AutocompleteEvent::KeyDown(_)))
    );
}

#[test]
fn arrow_up_at_top_emits_no_key_up() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    let result = press(&mut widget, KeyCode::Up);

    assert_eq!(widget.highlighted_index(), 0);
    assert_eq!(widget.text(), "ap");
    assert!(result.effects.is_empty());
    assert_eq!(
        result.events,
        vec![AutocompleteEvent::Input("ap".to_string())]
    );
}

#[test]
fn arrow_up_moves_back_and_aligns_to_top() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    press(&mut widget, KeyCode::Down);
    let result = press(&mut widget, KeyCode::Up);

    assert_eq!(widget.highlighted_index(), 0);
    assert_eq!(widget.text(), "Apple");
    assert_eq!(
        result.effects,
        vec![HostEffect::ScrollIntoView {
            index: 0,
            align_top: true
        }]
    );
    assert_eq!(result.events.last(), Some(&AutocompleteEvent::KeyUp));
}

#[test]
fn arrow_right_accepts_highlighted_completion() {
    let mut widget = widget();
    type_text(&mut widget, "apr");
    let result = press(&mut widget, KeyCode::Right);

    assert_eq!(widget.text(), "Apricot");
    assert_eq!(widget.cursor(), "Apricot".len());
    assert_eq!(result.events.last(), Some(&AutocompleteEvent::KeyRight));
}

#[test]
fn arrow_right_inside_text_moves_cursor() {
    let mut widget = widget();
    type_text(&mut widget, "apr");
    press(&mut widget, KeyCode::Left);
    assert_eq!(widget.cursor(), 2);

    let result = press(&mut widget, KeyCode::Right);
    assert_eq!(widget.cursor(), 3);
    assert_eq!(widget.text(), "apr");
    assert!(!result.events.contains(&AutocompleteEvent::KeyRight));

    let result = press(&mut widget, KeyCode::Right);
    assert_eq!(widget.text(), "Apricot");
    assert_eq!(result.events.last(), Some(&AutocompleteEvent::KeyRight));
}

#[test]
fn enter_commits_highlighted_candidate() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    let result = press(&mut widget, KeyCode::Enter);

    assert_eq!(widget.text(), "Apple");
    assert_eq!(widget.chosen(), fruit_named("Apple").as_ref());
    assert!(widget.visible().is_empty());
    assert_eq!(
        result.events,
        vec![
            AutocompleteEvent::Selected(fruit_named("Apple")),
            AutocompleteEvent::Input("Apple".to_string()),
            AutocompleteEvent::Enter,
        ]
    );
}

#[test]
fn enter_without_matches_keeps_typed_text() {
    let mut widget = widget();
    type_text(&mut widget, "zz");
    let result = press(&mut widget, KeyCode::Enter);

    assert_eq!(widget.text(), "zz");
    assert!(widget.chosen().is_none());
    assert_eq!(result.events, vec![AutocompleteEvent::Enter]);
}

#[test]
fn escape_clears_list_and_asks_for_blur() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    let result = press(&mut widget, KeyCode::Esc);

    assert_eq!(widget.text(), "ap");
    assert!(widget.visible().is_empty());
    assert!(widget.chosen().is_none());
    assert_eq!(result.events, vec![AutocompleteEvent::Escape]);
    assert_eq!(result.effects, vec![HostEffect::Blur]);
}

#[test]
fn pointer_selection_commits_and_closes_list() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    let result = widget.select_index(1);

    assert_eq!(widget.text(), "Apricot");
    assert!(!widget.shows_list());
    assert_eq!(widget.placeholder(), Some(""));
    assert_eq!(
        result.events[result.events.len() - 2..],
        [
            AutocompleteEvent::Selected(fruit_named("Apricot")),
            AutocompleteEvent::Input("Apricot".to_string()),
        ]
    );
}

#[test]
fn pick_outside_visible_list_is_ignored() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    let result = widget.select_index(7);

    assert!(!result.handled);
    assert!(result.events.is_empty());
    assert_eq!(widget.text(), "ap");
    assert_eq!(widget.highlighted_index(), 0);
    assert_eq!(widget.visible_labels(), vec!["Apple", "Apricot"]);

    let result = press(&mut widget, KeyCode::Up);
    assert!(result.effects.is_empty());
    assert!(!result.events.contains(&AutocompleteEvent::KeyUp));

    widget.select_index(usize::MAX);
    let result = press(&mut widget, KeyCode::Down);
    assert_eq!(widget.highlighted_index(), 1);
    assert_eq!(widget.text(), "Apricot");
    assert_eq!(
        result.effects,
        vec![HostEffect::ScrollIntoView {
            index: 1,
            align_top: false
        }]
    );
}

#[test]
fn pick_on_empty_list_is_ignored() {
    let mut widget = widget();
    let result = widget.select_index(0);

    assert!(!result.handled);
    assert!(result.events.is_empty());
    assert!(widget.chosen().is_none());
    assert_eq!(widget.text(), "");
}

#[test]
fn arrows_after_pick_stay_within_empty_list() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    widget.select_index(1);
    assert!(widget.visible().is_empty());

    let result = press(&mut widget, KeyCode::Up);
    assert_eq!(widget.highlighted_index(), 0);
    assert!(result.effects.is_empty());
    assert!(!result.events.contains(&AutocompleteEvent::KeyUp));

    let result = press(&mut widget, KeyCode::Down);
    assert_eq!(widget.highlighted_index(), 0);
    assert!(result.effects.is_empty());
    assert_eq!(widget.text(), "Apricot");
}

#[test]
fn reset_restores_defaults_and_announces_clear() {
    let mut widget = widget();
    type_text(&mut widget, "ap");
    press(&mut widget, KeyCode::Down);
    let result = widget.reset();

    assert_eq!(widget.text(), "");
    assert!(widget.visible().is_empty());
    assert!(widget.chosen().is_none());
    assert_eq!(widget.placeholder(), Some("write something..."));
    assert_eq!(
        result.events,
        vec![
            AutocompleteEvent::Clear,
            AutocompleteEvent::Selected(None),
            AutocompleteEvent::Input(String::new()),
        ]
    );
}

#[test]
fn deleting_all_text_restores_default_placeholder() {
    let mut widget = widget();
    type_text(&mut widget, "a");
    press(&mut widget, KeyCode::Backspace);

    assert_eq!(widget.text(), "");
    assert!(widget.visible().is_empty());
    assert_eq!(widget.placeholder(), Some("write something..."));
}

#[test]
fn max_limit_caps_visible_list() {
    let source = (0..10)
        .map(|i| Candidate::labeled("label", format!("item {i}")))
        .collect::<Vec<_>>();
    let mut widget = Autocomplete::new(
        AutocompleteConfig::new("label").with_max_limit(3),
        source.into(),
        "",
    )
    .expect("valid");
    widget.set_text("item");

    assert_eq!(widget.visible_labels(), vec!["item 0", "item 1", "item 2"]);
}

#[test]
fn duplicate_labels_shown_once_unless_allowed() {
    let source = labeled(&["Apple", "Apple", "Apricot"]);

    let mut strict = Autocomplete::new(AutocompleteConfig::new("label"), source.clone().into(), "")
        .expect("valid");
    strict.set_text("ap");
    assert_eq!(strict.visible_labels(), vec!["Apple", "Apricot"]);

    let mut loose = Autocomplete::new(
        AutocompleteConfig::new("label").with_allow_similar(true),
        source.into(),
        "",
    )
    .expect("valid");
    loose.set_text("ap");
    assert_eq!(loose.visible_labels(), vec!["Apple", "Apple", "Apricot"]);
}

#[test]
fn all_words_mode_matches_inner_words() {
    let source = labeled(&["Paris France", "New York", "Frankfurt"]);
    let mut widget = Autocomplete::new(
        AutocompleteConfig::new("label").with_suggest_on_all_words(true),
        source.into(),
        "",
    )
    .expect("valid");
    widget.set_text("fr");

    assert_eq!(widget.visible_labels(), vec!["Paris France", "Frankfurt"]);
}

#[test]
fn list_needs_min_match_candidates() {
    let mut widget = widget_with(AutocompleteConfig::new("label").with_min_match(3));
    type_text(&mut widget, "ap");
    assert!(!widget.shows_list());

    widget.set_text("a");
    assert_eq!(widget.visible().len(), 3);
    assert!(widget.shows_list());
}

#[test]
fn hidden_placeholder_and_list_flags() {
    let mut widget = widget_with(
        AutocompleteConfig::new("label")
            .with_show_placeholder(false)
            .with_show_autocomplete(false),
    );
    type_text(&mut widget, "ap");

    assert_eq!(widget.visible().len(), 2);
    assert!(!widget.shows_list());
    assert_eq!(widget.placeholder(), None);
}

#[test]
fn disabled_widget_ignores_input() {
    let mut widget = widget_with(AutocompleteConfig::new("label").with_disabled(true));
    let result = widget.on_key(KeyEvent::plain(KeyCode::Char('a')));

    assert!(!result.handled);
    assert!(result.events.is_empty());
    assert_eq!(widget.text(), "");
    assert!(!widget.select_index(0).handled);
    assert!(!widget.wants_focus());
}

#[test]
fn missing_attribute_is_rejected() {
    let err = Autocomplete::new(AutocompleteConfig::new(" "), fruit().into(), "")
        .err()
        .expect("config error");
    assert!(matches!(err, ConfigError::MissingAttribute));
}

#[test]
fn initial_record_selects_itself_on_first_result() {
    let mut widget = Autocomplete::new(
        AutocompleteConfig::new("label"),
        fruit().into(),
        Candidate::labeled("label", "Apple"),
    )
    .expect("valid");

    assert_eq!(widget.text(), "Apple");
    let result = widget.on_tick(Instant::now());
    assert_eq!(
        result.events,
        vec![
            AutocompleteEvent::Selected(fruit_named("Apple")),
            AutocompleteEvent::Input("Apple".to_string()),
        ]
    );
    assert!(widget.on_tick(Instant::now()).events.is_empty());
}

#[test]
fn clicks_reopen_list_and_report_text() {
    let mut widget = widget();
    type_text(&mut widget, "ap");

    widget.on_click_outside();
    assert!(!widget.shows_list());

    let pointer = PointerEvent { col: 4, row: 0 };
    let result = widget.on_click_input(pointer);
    assert!(widget.shows_list());
    assert_eq!(result.events, vec![AutocompleteEvent::ClickInput(pointer)]);

    let result = widget.on_button_click();
    assert_eq!(
        result.events,
        vec![AutocompleteEvent::ClickButton("ap".to_string())]
    );
}

#[test]
fn placeholder_update_shows_while_text_empty() {
    let mut widget = widget();
    widget.set_placeholder("pick a fruit");
    assert_eq!(widget.placeholder(), Some("pick a fruit"));

    type_text(&mut widget, "zz");
    widget.set_placeholder("another");
    assert_eq!(widget.placeholder(), Some(""));
}

#[test]
fn replacing_suggestions_recomputes_visible_list() {
    let mut widget = widget();
    type_text(&mut widget, "b");
    assert_eq!(widget.visible_labels(), vec!["Banana"]);

    widget.set_suggestions(labeled(&["Blueberry", "Blackberry", "Cherry"]).into());
    assert_eq!(widget.visible_labels(), vec!["Blueberry", "Blackberry"]);
}

#[test]
fn lookup_calls_are_debounced_to_last_text() {
    let calls = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen = calls.clone();
    let source = SuggestionSource::lookup(move |text: &str| {
        seen.lock().expect("lock").push(text.to_string());
        LookupResponse::Ready(fruit())
    });
    let mut widget = Autocomplete::new(
        AutocompleteConfig::new("label").with_debounce_ms(100),
        source,
        "",
    )
    .expect("valid");
    let t0 = Instant::now();

    widget.on_tick(t0);
    type_text(&mut widget, "a");
    widget.on_tick(t0 + Duration::from_millis(50));
    type_text(&mut widget, "p");
    widget.on_tick(t0 + Duration::from_millis(120));
    assert!(widget.visible().is_empty());

    let result = widget.on_tick(t0 + Duration::from_millis(160));
    assert!(result.request_render);
    assert_eq!(widget.visible_labels(), vec!["Apple", "Apricot"]);

    let typed = calls
        .lock()
        .expect("lock")
        .iter()
        .filter(|text| !text.is_empty())
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(typed, vec!["ap".to_string()]);
}

#[test]
fn only_latest_pending_lookup_reaches_the_list() {
    let handles = Arc::new(Mutex::new(Vec::new()));
    let sink = handles.clone();
    let source = SuggestionSource::lookup(move |text: &str| {
        let (handle, pending) = PendingLookup::channel();
        sink.lock().expect("lock").push((text.to_string(), handle));
        LookupResponse::Pending(pending)
    });
    let mut widget = Autocomplete::new(
        AutocompleteConfig::new("label").with_debounce_ms(0),
        source,
        "",
    )
    .expect("valid");
    let t0 = Instant::now();

    widget.on_tick(t0);
    type_text(&mut widget, "a");
    widget.on_tick(t0);
    assert!(widget.is_loading());
    type_text(&mut widget, "p");
    widget.on_tick(t0);

    let mut handles = std::mem::take(&mut *handles.lock().expect("lock"));
    let (latest_text, latest) = handles.pop().expect("latest lookup");
    let (older_text, older) = handles.pop().expect("older lookup");
    assert_eq!(latest_text, "ap");
    assert_eq!(older_text, "a");

    latest.resolve(fruit());
    older.resolve(labeled(&["Avocado"]));
    widget.on_tick(t0);

    assert!(!widget.is_loading());
    assert_eq!(widget.visible_labels(), vec!["Apple", "Apricot"]);
}

#[test]
fn failed_lookup_clears_loading_and_keeps_list() {
    let source = SuggestionSource::lookup(|_text: &str| {
        LookupResponse::Pending(PendingLookup::settled(Err(
            instant_suggest::LookupError::Rejected("offline".to_string()),
        )))
    });
    let mut widget = Autocomplete::new(
        AutocompleteConfig::new("label").with_debounce_ms(0),
        source,
        "",
    )
    .expect("valid");
    let t0 = Instant::now();

    type_text(&mut widget, "a");
    widget.on_tick(t0);

    assert!(!widget.is_loading());
    assert!(widget.visible().is_empty());
}

#[test]
fn lookup_answering_nothing_keeps_visible_list() {
    let answered = Arc::new(Mutex::new(false));
    let flag = answered.clone();
    let source = SuggestionSource::lookup(move |text: &str| {
        let mut answered = flag.lock().expect("lock");
        if text.is_empty() || *answered {
            return LookupResponse::Nothing;
        }
        *answered = true;
        LookupResponse::Ready(fruit())
    });
    let mut widget = Autocomplete::new(
        AutocompleteConfig::new("label").with_debounce_ms(0),
        source,
        "",
    )
    .expect("valid");
    let t0 = Instant::now();

    widget.on_tick(t0);
    type_text(&mut widget, "ap");
    widget.on_tick(t0);
    assert_eq!(widget.visible_labels(), vec!["Apple", "Apricot"]);

    widget.recompute();
    widget.on_tick(t0 + Duration::from_millis(10));

    assert!(!widget.is_loading());
    assert_eq!(widget.visible_labels(), vec!["Apple", "Apricot"]);
    assert_eq!(widget.highlighted_index(), 0);
}
