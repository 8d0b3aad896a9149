use folio_codec::CodecError;
use folio_dom::{NodeId, Selector, html};
use folio_engine::{
    Action, BuilderSession, EngineError, FormField, Mismatch, NotificationLevel, Outcome, Target,
};
use folio_model::{ComponentRecord, Configuration, FieldMap, Settings, TemplateRegistry};
use folio_types::{ChangePayload, ComponentId, ComponentType, Direction, ManualClock, Timestamp};
use pretty_assertions::assert_eq;

const START: i64 = 1_760_000_000_000;

fn session() -> BuilderSession {
    BuilderSession::new(
        TemplateRegistry::builtin(),
        Settings::default(),
        Box::new(ManualClock::new(START, 1)),
    )
    .unwrap()
}

fn fields(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn reconciled(session: &BuilderSession) {
    assert_eq!(session.check_reconciliation(), Ok(()));
}

fn rendered_text(session: &BuilderSession, id: &ComponentId, field: &str) -> String {
    let instance = session.page().instance(id).unwrap();
    let node = session.page().field(instance, field).unwrap();
    session.document().text_content(node)
}

fn section_names(session: &BuilderSession) -> Vec<String> {
    let page = session.page();
    page.sections()
        .into_iter()
        .filter_map(|n| page.section_name(n).map(str::to_string))
        .collect()
}

fn control(session: &BuilderSession, scope: NodeId, action: &str) -> NodeId {
    session
        .document()
        .find_first(scope, &Selector::attr_eq("data-action", action))
        .unwrap()
}

fn page_html(session: &BuilderSession) -> String {
    html::outer_html(session.document(), session.page().root())
}

// ── Skeleton ─────────────────────────────────────────────────────

#[test]
fn fresh_session_renders_static_sections_only() {
    let s = session();
    assert!(s.is_empty());
    assert_eq!(
        section_names(&s),
        vec!["hero-section", "projects-section", "skills-section"]
    );
    let root = s.document().element(s.page().root()).unwrap();
    assert_eq!(root.tag, "main");
    assert_eq!(root.id.as_deref(), Some("website-container"));
    reconciled(&s);
}

// ── Add ──────────────────────────────────────────────────────────

#[test]
fn add_with_initial_data() {
    let mut s = session();
    let id = s
        .add(ComponentType::ProjectCard, Some(fields(&[("title", "Foo")])))
        .unwrap();

    assert_eq!(s.len(), 1);
    let record = s.record(&id).unwrap();
    assert_eq!(record.component_type, ComponentType::ProjectCard);
    assert_eq!(record.field("title"), Some("Foo"));
    assert_eq!(record.field("description"), Some("Projekt Beschreibung"));
    assert_eq!(record.created_at, Timestamp::from_millis(START));
    assert_eq!(record.modified_at, None);
    assert_eq!(rendered_text(&s, &id, "title"), "Foo");
    assert!(id.is_generated());
    reconciled(&s);
}

#[test]
fn add_ignores_fields_outside_the_schema() {
    let mut s = session();
    let id = s
        .add(
            ComponentType::SkillItem,
            Some(fields(&[("title", "Rust"), ("colour", "red")])),
        )
        .unwrap();
    let record = s.record(&id).unwrap();
    assert_eq!(
        record.data.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["description", "icon", "title"]
    );
}

#[test]
fn add_places_component_in_its_grid() {
    let mut s = session();
    let id = s.add(ComponentType::SkillItem, None).unwrap();
    let instance = s.page().instance(&id).unwrap();
    let grid = s.document().parent(instance).unwrap();
    assert!(s.document().element(grid).unwrap().has_class("skills-grid"));

    let element = s.document().element(instance).unwrap();
    assert!(element.has_class("skill-item"));
    assert!(element.has_class("component"));
    assert_eq!(element.attr("data-component"), Some("skill-item"));
}

#[test]
fn add_synthesizes_missing_section_once() {
    let mut s = session();
    let first = s.add(ComponentType::TutorialCard, None).unwrap();
    let second = s.add(ComponentType::TutorialCard, None).unwrap();

    let grids = s
        .document()
        .find_all(s.page().root(), &Selector::class("tutorials-grid"));
    assert_eq!(grids.len(), 1);
    assert_eq!(
        s.document().parent(s.page().instance(&first).unwrap()),
        s.document().parent(s.page().instance(&second).unwrap()),
    );

    let created = s
        .events()
        .iter()
        .filter(|e| matches!(e.payload, ChangePayload::SectionCreated { .. }))
        .count();
    assert_eq!(created, 1);
    reconciled(&s);
}

#[test]
fn synthesized_sections_follow_their_anchor() {
    let mut s = session();
    s.add(ComponentType::SocialLink, None).unwrap();
    s.add(ComponentType::TutorialCard, None).unwrap();
    s.add(ComponentType::UpdateItem, None).unwrap();
    assert_eq!(
        section_names(&s),
        vec![
            "hero-section",
            "projects-section",
            "skills-section",
            "tutorials-section",
            "social-section",
            "updates-section",
        ]
    );
    let updates = s.page().section("updates-section").unwrap();
    assert!(s.document().element(updates).unwrap().has_class("dark-section"));
}

#[test]
fn add_without_template_changes_nothing() {
    let mut s = BuilderSession::new(
        TemplateRegistry::empty(),
        Settings::default(),
        Box::new(ManualClock::new(START, 1)),
    )
    .unwrap();
    let before = page_html(&s);
    let err = s.add(ComponentType::ProjectCard, None).unwrap_err();
    assert!(matches!(err, EngineError::TemplateNotFound(ComponentType::ProjectCard)));
    assert!(s.is_empty());
    assert_eq!(page_html(&s), before);
}

#[test]
fn add_to_detached_container_fails() {
    let mut s = session();
    let root = s.page().root();
    let err = s.add_to(ComponentType::SkillItem, root, None).unwrap_err();
    assert!(matches!(err, EngineError::ContainerNotFound(_)));
    assert!(s.is_empty());
}

#[test]
fn add_to_component_instance_fails() {
    let mut s = session();
    let outer = s.add(ComponentType::ProjectCard, None).unwrap();
    let instance = s.page().instance(&outer).unwrap();
    let before = page_html(&s);

    let err = s
        .add_to(ComponentType::SkillItem, instance, None)
        .unwrap_err();
    assert!(matches!(err, EngineError::ContainerNotFound(_)));
    assert_eq!(s.len(), 1);
    assert_eq!(page_html(&s), before);

    s.delete(&outer).unwrap();
    assert!(s.is_empty());
    reconciled(&s);
}

#[test]
fn add_to_field_or_section_node_fails() {
    let mut s = session();
    let outer = s.add(ComponentType::ProjectCard, None).unwrap();
    let instance = s.page().instance(&outer).unwrap();
    let title = s.page().field(instance, "title").unwrap();
    let section = s.page().section("projects-section").unwrap();

    for node in [title, section] {
        let err = s.add_to(ComponentType::SkillItem, node, None).unwrap_err();
        assert!(matches!(err, EngineError::ContainerNotFound(_)));
    }
    assert_eq!(s.len(), 1);
    reconciled(&s);
}

#[test]
fn add_to_explicit_grid_reconciles() {
    let mut s = session();
    s.add(ComponentType::SkillItem, None).unwrap();
    let spec = s.registry().section("projects-section").unwrap().clone();
    let grid = s.page().grid(&spec).unwrap();

    let id = s
        .add_to(ComponentType::ProjectCard, grid, Some(fields(&[("title", "Foo")])))
        .unwrap();
    let instance = s.page().instance(&id).unwrap();
    assert_eq!(s.document().parent(instance), Some(grid));
    assert_eq!(rendered_text(&s, &id, "title"), "Foo");
    assert_eq!(s.len(), 2);
    reconciled(&s);
}

// ── Edit ─────────────────────────────────────────────────────────

#[test]
fn edit_updates_record_and_tree() {
    let mut s = session();
    let id = s.add(ComponentType::SocialLink, None).unwrap();
    s.edit(&id, &fields(&[("handle", "@folio"), ("bogus", "x")]))
        .unwrap();

    let record = s.record(&id).unwrap();
    assert_eq!(record.field("handle"), Some("@folio"));
    assert_eq!(record.field("title"), Some("Plattform"));
    assert!(!record.data.contains_key("bogus"));
    assert!(record.modified_at.is_some());
    assert_eq!(rendered_text(&s, &id, "handle"), "@folio");

    let last = s.events().last().unwrap();
    assert_eq!(
        last.payload,
        ChangePayload::ComponentUpdated {
            id: id.clone(),
            fields: vec!["handle".into()],
        }
    );
    reconciled(&s);
}

#[test]
fn edit_unknown_component_fails() {
    let mut s = session();
    let ghost = ComponentId::parse("ghost").unwrap();
    let err = s.edit(&ghost, &fields(&[("title", "x")])).unwrap_err();
    assert!(matches!(err, EngineError::NotFound(id) if id == ghost));
}

// ── Delete ───────────────────────────────────────────────────────

#[test]
fn delete_twice_fails_the_second_time() {
    let mut s = session();
    let keep = s.add(ComponentType::SkillItem, None).unwrap();
    let id = s.add(ComponentType::SkillItem, None).unwrap();

    s.delete(&id).unwrap();
    assert_eq!(s.len(), 1);
    assert!(s.page().instance(&id).is_none());

    let err = s.delete(&id).unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
    assert_eq!(s.len(), 1);
    assert!(s.record(&keep).is_some());
    reconciled(&s);
}

// ── Duplicate ────────────────────────────────────────────────────

#[test]
fn duplicate_marks_the_copy() {
    let mut s = session();
    let id = s
        .add(
            ComponentType::TutorialCard,
            Some(fields(&[("title", "Demo"), ("level", "Profi")])),
        )
        .unwrap();
    let copy = s.duplicate(&id).unwrap();

    assert_ne!(copy, id);
    let record = s.record(&copy).unwrap();
    assert_eq!(record.field("title"), Some("Demo (Kopie)"));
    assert_eq!(record.field("level"), Some("Profi"));
    assert_eq!(s.record(&id).unwrap().field("title"), Some("Demo"));
    assert_eq!(rendered_text(&s, &copy, "title"), "Demo (Kopie)");

    let ids = s.page().instance_ids();
    assert_eq!(ids, vec![id, copy]);
    reconciled(&s);
}

#[test]
fn duplicate_unknown_component_fails() {
    let mut s = session();
    let err = s
        .duplicate(&ComponentId::parse("nope").unwrap())
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
    assert!(s.is_empty());
}

// ── Move ─────────────────────────────────────────────────────────

#[test]
fn moving_first_component_up_is_a_no_op() {
    let mut s = session();
    let first = s.add(ComponentType::ProjectCard, None).unwrap();
    s.add(ComponentType::ProjectCard, None).unwrap();
    let before = page_html(&s);

    assert_eq!(s.move_component(&first, Direction::Up).unwrap(), false);
    assert_eq!(page_html(&s), before);
}

#[test]
fn move_swaps_and_recomputes_order() {
    let mut s = session();
    let a = s.add(ComponentType::ProjectCard, None).unwrap();
    let b = s.add(ComponentType::ProjectCard, None).unwrap();
    let c = s.add(ComponentType::ProjectCard, None).unwrap();

    assert!(s.move_component(&a, Direction::Down).unwrap());
    assert_eq!(s.page().instance_ids(), vec![b.clone(), a.clone(), c.clone()]);
    let orders: Vec<_> = s.records().iter().map(|r| (r.id.clone(), r.order)).collect();
    assert_eq!(
        orders,
        vec![(b, Some(0)), (a.clone(), Some(1)), (c.clone(), Some(2))]
    );

    assert!(!s.move_component(&c, Direction::Down).unwrap());
    assert!(s.move_component(&c, Direction::Up).unwrap());
    assert_eq!(s.record(&c).unwrap().order, Some(1));
    assert_eq!(s.record(&a).unwrap().order, Some(2));
    reconciled(&s);
}

#[test]
fn move_unknown_component_fails() {
    let mut s = session();
    let err = s
        .move_component(&ComponentId::parse("x").unwrap(), Direction::Down)
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

// ── Sections ─────────────────────────────────────────────────────

#[test]
fn add_child_uses_the_sections_grid() {
    let mut s = session();
    let id = s.add_child("skills-section").unwrap();
    assert_eq!(s.record(&id).unwrap().component_type, ComponentType::SkillItem);

    let err = s.add_child("tutorials-section").unwrap_err();
    assert!(matches!(err, EngineError::SectionNotFound(_)));
}

#[test]
fn move_section_swaps_with_neighbouring_section() {
    let mut s = session();
    let project = s.add(ComponentType::ProjectCard, None).unwrap();
    let skill = s.add(ComponentType::SkillItem, None).unwrap();

    assert!(s.move_section("skills-section", Direction::Up).unwrap());
    assert_eq!(
        section_names(&s),
        vec!["hero-section", "skills-section", "projects-section"]
    );
    assert_eq!(s.record(&skill).unwrap().order, Some(0));
    assert_eq!(s.record(&project).unwrap().order, Some(1));

    // The hero is not a movable section.
    assert!(!s.move_section("skills-section", Direction::Up).unwrap());
    assert!(!s.move_section("projects-section", Direction::Down).unwrap());
}

#[test]
fn delete_section_removes_its_components() {
    let mut s = session();
    s.add(ComponentType::ProjectCard, None).unwrap();
    s.add(ComponentType::ProjectCard, None).unwrap();
    let skill = s.add(ComponentType::SkillItem, None).unwrap();

    assert_eq!(s.delete_section("projects-section").unwrap(), 2);
    assert_eq!(s.len(), 1);
    assert!(s.record(&skill).is_some());
    assert!(s.page().section("projects-section").is_none());
    reconciled(&s);

    // A static section comes back on demand.
    s.add(ComponentType::ProjectCard, None).unwrap();
    assert_eq!(
        section_names(&s),
        vec!["hero-section", "projects-section", "skills-section"]
    );
    reconciled(&s);
}

#[test]
fn edit_section_changes_heading_only() {
    let mut s = session();
    s.edit_section("projects-section", &fields(&[("projects-title", "Arbeiten")]))
        .unwrap();
    let form = s
        .edit_form(&Target::Section("projects-section".into()))
        .unwrap();
    assert_eq!(form.value("projects-title"), Some("Arbeiten"));
    assert!(s.is_empty());
}

#[test]
fn edit_section_leaves_component_fields_alone() {
    let mut s = session();
    let id = s.add(ComponentType::ProjectCard, None).unwrap();

    s.edit_section("projects-section", &fields(&[("title", "Arbeiten")]))
        .unwrap();
    assert_eq!(rendered_text(&s, &id, "title"), "Projekt Titel");
    assert_eq!(s.record(&id).unwrap().field("title"), Some("Projekt Titel"));
    reconciled(&s);
}

#[test]
fn section_form_cannot_reach_component_fields() {
    let mut s = session();
    let id = s.add(ComponentType::ProjectCard, None).unwrap();
    let target = Target::Section("projects-section".into());
    let mut form = s.edit_form(&target).unwrap();
    assert_eq!(form.fields.len(), 1);
    assert!(!form.set("title", "Arbeiten"));

    form.fields.push(FormField::new("title", "Arbeiten"));
    assert!(form.set("projects-title", "Neue Arbeiten"));
    s.apply_form(&form).unwrap();

    assert_eq!(
        s.edit_form(&target).unwrap().value("projects-title"),
        Some("Neue Arbeiten")
    );
    assert_eq!(rendered_text(&s, &id, "title"), "Projekt Titel");
    assert_eq!(s.record(&id).unwrap().field("title"), Some("Projekt Titel"));
    reconciled(&s);
}

// ── Dispatch ─────────────────────────────────────────────────────

#[test]
fn clicking_a_control_runs_its_action() {
    let mut s = session();
    let id = s.add(ComponentType::SkillItem, None).unwrap();
    let instance = s.page().instance(&id).unwrap();
    let button = control(&s, instance, "duplicate");

    let outcome = s.dispatch_click(button).unwrap();
    let Some(Outcome::Added(copy)) = outcome else {
        panic!("expected a duplicate, got {outcome:?}");
    };
    assert_eq!(s.record(&copy).unwrap().field("title"), Some("Skill (Kopie)"));

    let instance = s.page().instance(&copy).unwrap();
    let button = control(&s, instance, "delete");
    assert_eq!(s.dispatch_click(button).unwrap(), Some(Outcome::Removed(1)));
    assert_eq!(s.len(), 1);
    reconciled(&s);
}

#[test]
fn clicking_section_controls_targets_the_section() {
    let mut s = session();
    let section = s.page().section("skills-section").unwrap();
    let button = control(&s, section, "add-child");
    assert_eq!(
        s.document().element(button).unwrap().attr("data-child-type"),
        Some("skill-item")
    );

    let outcome = s.dispatch_click(button).unwrap();
    assert!(matches!(outcome, Some(Outcome::Added(_))));
    assert_eq!(s.len(), 1);
}

#[test]
fn clicks_outside_controls_are_ignored() {
    let mut s = session();
    let id = s.add(ComponentType::SkillItem, None).unwrap();
    let instance = s.page().instance(&id).unwrap();
    let title = s.page().field(instance, "title").unwrap();
    assert_eq!(s.dispatch_click(title).unwrap(), None);
    assert!(s.drain_notifications().is_empty());
}

#[test]
fn edit_action_opens_a_form_that_saves_as_edit() {
    let mut s = session();
    let id = s.add(ComponentType::UpdateItem, None).unwrap();
    let target = Target::Component(id.clone());

    let Outcome::Form(mut form) = s.invoke(Action::Edit, &target).unwrap() else {
        panic!("expected a form");
    };
    let names: Vec<_> = form.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["date", "title", "description"]);
    assert!(form.fields[2].multiline);
    assert!(!form.fields[1].multiline);
    assert_eq!(form.fields[1].label, "Title");

    assert!(form.set("title", "Release 1.0"));
    s.apply_form(&form).unwrap();
    assert_eq!(s.record(&id).unwrap().field("title"), Some("Release 1.0"));
    assert_eq!(rendered_text(&s, &id, "title"), "Release 1.0");

    let notes = s.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Success);
}

#[test]
fn failed_invocation_notifies_and_changes_nothing() {
    let mut s = session();
    let target = Target::Component(ComponentId::parse("gone").unwrap());
    assert!(s.invoke(Action::Delete, &target).is_err());
    let notes = s.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);

    let err = s
        .invoke(Action::Duplicate, &Target::Section("skills-section".into()))
        .unwrap_err();
    assert!(matches!(err, EngineError::Unsupported { .. }));
    assert!(s.is_empty());
}

#[test]
fn boundary_move_notifies_info() {
    let mut s = session();
    let id = s.add(ComponentType::SkillItem, None).unwrap();
    let outcome = s.invoke(Action::MoveUp, &Target::Component(id)).unwrap();
    assert_eq!(outcome, Outcome::Moved(false));
    assert_eq!(s.drain_notifications()[0].level, NotificationLevel::Info);
}

#[test]
fn invoked_moves_follow_their_direction() {
    let mut s = session();
    let a = s.add(ComponentType::SkillItem, None).unwrap();
    let b = s.add(ComponentType::SkillItem, None).unwrap();

    let outcome = s.invoke(Action::MoveDown, &Target::Component(a.clone())).unwrap();
    assert_eq!(outcome, Outcome::Moved(true));
    assert_eq!(s.page().instance_ids(), vec![b.clone(), a.clone()]);

    let outcome = s.invoke(Action::MoveDown, &Target::Component(a.clone())).unwrap();
    assert_eq!(outcome, Outcome::Moved(false));

    let outcome = s.invoke(Action::MoveUp, &Target::Component(a.clone())).unwrap();
    assert_eq!(outcome, Outcome::Moved(true));
    assert_eq!(s.page().instance_ids(), vec![a, b]);
    reconciled(&s);
}

// ── Inline editing ───────────────────────────────────────────────

#[test]
fn inline_edit_folds_rendered_text_back() {
    let mut s = session();
    let id = s.add(ComponentType::SkillItem, None).unwrap();

    s.begin_inline_edit(&id, "title").unwrap();
    let instance = s.page().instance(&id).unwrap();
    let node = s.page().field(instance, "title").unwrap();
    assert_eq!(
        s.document().element(node).unwrap().attr("contenteditable"),
        Some("true")
    );

    s.type_inline_text("Systemprogrammierung").unwrap();
    assert_eq!(s.record(&id).unwrap().field("title"), Some("Skill"));

    assert!(s.finish_inline_edit().unwrap());
    assert_eq!(
        s.record(&id).unwrap().field("title"),
        Some("Systemprogrammierung")
    );
    assert_eq!(
        s.document().element(node).unwrap().attr("contenteditable"),
        None
    );
    assert!(!s.finish_inline_edit().unwrap());
}

#[test]
fn starting_another_inline_edit_finishes_the_first() {
    let mut s = session();
    let id = s.add(ComponentType::SkillItem, None).unwrap();
    s.begin_inline_edit(&id, "title").unwrap();
    s.type_inline_text("Rust").unwrap();
    s.begin_inline_edit(&id, "description").unwrap();

    assert_eq!(s.record(&id).unwrap().field("title"), Some("Rust"));
    assert_eq!(s.inline_edit(), Some((&id, "description")));
}

#[test]
fn inline_edit_rejects_unknown_fields() {
    let mut s = session();
    let id = s.add(ComponentType::SkillItem, None).unwrap();
    let err = s.begin_inline_edit(&id, "handle").unwrap_err();
    assert!(matches!(err, EngineError::FieldNotFound { .. }));
    assert!(matches!(
        s.type_inline_text("x").unwrap_err(),
        EngineError::NoInlineEdit
    ));
}

#[test]
fn deleting_the_edited_component_drops_the_inline_edit() {
    let mut s = session();
    let id = s.add(ComponentType::SkillItem, None).unwrap();
    s.begin_inline_edit(&id, "title").unwrap();
    s.delete(&id).unwrap();
    assert_eq!(s.inline_edit(), None);
    assert!(!s.finish_inline_edit().unwrap());
}

// ── Reload / import / export ─────────────────────────────────────

fn record(id: &str, component_type: ComponentType, title: &str, order: Option<i64>) -> ComponentRecord {
    ComponentRecord {
        order,
        ..ComponentRecord::new(
            ComponentId::parse(id).unwrap(),
            component_type,
            fields(&[("title", title)]),
            Timestamp::from_millis(42),
        )
    }
}

#[test]
fn reload_replays_by_order_with_stable_ties() {
    let mut s = session();
    s.add(ComponentType::KnowledgeCategory, None).unwrap();

    let config = Configuration::new(
        Settings {
            dark_mode: false,
            ..Settings::default()
        },
        vec![
            record("c", ComponentType::SkillItem, "C", Some(2)),
            record("a", ComponentType::SkillItem, "A", None),
            record("b", ComponentType::SkillItem, "B", Some(0)),
            record("d", ComponentType::TutorialCard, "D", Some(1)),
        ],
    );
    assert_eq!(s.reload(config).unwrap(), 4);

    let ids: Vec<_> = s.page().instance_ids().iter().map(|i| i.to_string()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    assert!(s.page().section("knowledge-section").is_none());
    assert!(s.page().section("tutorials-section").is_some());
    assert!(!s.settings().dark_mode);

    let a = s.record(&ComponentId::parse("a").unwrap()).unwrap();
    assert_eq!(a.created_at, Timestamp::from_millis(42));
    assert_eq!(a.field("description"), Some("Skill Beschreibung"));
    reconciled(&s);
}

#[test]
fn reload_regenerates_repeated_ids() {
    let mut s = session();
    let config = Configuration::new(
        Settings::default(),
        vec![
            record("same", ComponentType::SkillItem, "1", Some(0)),
            record("same", ComponentType::SkillItem, "2", Some(1)),
        ],
    );
    s.reload(config).unwrap();
    assert_eq!(s.len(), 2);
    assert_eq!(s.records()[0].id.as_str(), "same");
    assert!(s.records()[1].id.is_generated());
    reconciled(&s);
}

#[test]
fn reload_with_unregistered_type_changes_nothing() {
    let mut registry = TemplateRegistry::empty();
    registry.register(
        TemplateRegistry::builtin()
            .get(ComponentType::SkillItem)
            .unwrap()
            .clone(),
    );
    let mut s = BuilderSession::new(
        registry,
        Settings::default(),
        Box::new(ManualClock::new(START, 1)),
    )
    .unwrap();
    let kept = s.add(ComponentType::SkillItem, None).unwrap();

    let config = Configuration::new(
        Settings::default(),
        vec![record("x", ComponentType::SocialLink, "X", None)],
    );
    let err = s.reload(config).unwrap_err();
    assert!(matches!(err, EngineError::TemplateNotFound(ComponentType::SocialLink)));
    assert_eq!(s.page().instance_ids(), vec![kept]);
}

#[test]
fn import_of_incomplete_document_changes_nothing() {
    let mut s = session();
    let id = s.add(ComponentType::ProjectCard, None).unwrap();
    let before = page_html(&s);

    let err = s.import_document(r#"{"darkMode": true}"#).unwrap_err();
    assert!(matches!(err, EngineError::Codec(CodecError::InvalidFormat(_))));
    let err = s.import_document("not json").unwrap_err();
    assert!(matches!(err, EngineError::Codec(CodecError::Parse(_))));

    assert_eq!(s.len(), 1);
    assert!(s.record(&id).is_some());
    assert_eq!(page_html(&s), before);
}

#[test]
fn export_then_import_reproduces_the_configuration() {
    let mut s = session();
    let a = s
        .add(ComponentType::ProjectCard, Some(fields(&[("title", "Foo")])))
        .unwrap();
    s.add(ComponentType::SocialLink, None).unwrap();
    s.add(ComponentType::TutorialCard, None).unwrap();
    s.duplicate(&a).unwrap();
    s.set_colors(Some("#111111"), None);
    s.set_dark_mode(false);

    let text = s.export_document().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["version"], "1.0");
    assert_eq!(value["components"][1]["data"]["title"], "Foo (Kopie)");

    let mut fresh = session();
    assert_eq!(fresh.import_document(&text).unwrap(), 4);
    assert_eq!(fresh.snapshot(), s.snapshot());
    assert_eq!(fresh.page().instance_ids(), s.page().instance_ids());
    reconciled(&fresh);
}

#[test]
fn export_filename_uses_the_session_clock() {
    let s = session();
    assert_eq!(s.export_filename(), "portfolio-config-2025-10-09.json");
}

#[test]
fn stale_import_completion_is_dropped() {
    let mut s = session();
    let doc = |title: &str| {
        format!(
            r#"{{"colors": {{}}, "components": [{{"id": "x", "type": "skill-item", "data": {{"title": "{title}"}}}}]}}"#
        )
    };
    let first = s.begin_import();
    let second = s.begin_import();

    assert_eq!(s.complete_import(second, &doc("second")).unwrap(), Some(1));
    assert_eq!(s.complete_import(first, &doc("first")).unwrap(), None);
    assert_eq!(s.records()[0].field("title"), Some("second"));

    let abandoned = s.begin_import();
    s.abandon_import(abandoned);
    assert_eq!(s.complete_import(abandoned, &doc("late")).unwrap(), None);
    assert_eq!(s.records()[0].field("title"), Some("second"));
}

#[test]
fn failed_import_completion_notifies_error() {
    let mut s = session();
    let ticket = s.begin_import();
    assert!(s.complete_import(ticket, "{").is_err());
    let notes = s.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
}

// ── Observation ──────────────────────────────────────────────────

#[test]
fn events_follow_each_transition() {
    let mut s = session();
    let id = s.add(ComponentType::TutorialCard, None).unwrap();
    s.move_component(&id, Direction::Up).unwrap();
    s.delete(&id).unwrap();
    s.set_dark_mode(false);

    let payloads: Vec<_> = s.drain_events().into_iter().map(|e| e.payload).collect();
    assert_eq!(
        payloads,
        vec![
            ChangePayload::SectionCreated {
                section: "tutorials-section".into()
            },
            ChangePayload::ComponentAdded {
                id: id.clone(),
                component_type: ComponentType::TutorialCard,
            },
            ChangePayload::ComponentRemoved { id },
            ChangePayload::SettingsChanged,
        ]
    );
    assert!(s.events().is_empty());
}

#[test]
fn reconciliation_reports_a_missing_instance() {
    let mut s = session();
    let config = Configuration::new(
        Settings::default(),
        vec![record("r", ComponentType::SkillItem, "R", None)],
    );
    s.reload(config).unwrap();
    reconciled(&s);

    let section = s.page().section("skills-section").unwrap();
    let button = control(&s, section, "delete");
    s.dispatch_click(button).unwrap();
    assert_eq!(s.check_reconciliation(), Ok(()));
    assert!(s.is_empty());

    // Sanity-check the variants render.
    let id = ComponentId::parse("r").unwrap();
    assert_eq!(
        Mismatch::MissingInstance(id).to_string(),
        "record r has no rendered instance"
    );
}
