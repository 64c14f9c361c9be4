use brackets_core::{
    EditorConfig, KeywordRange, RenderCommand, StyleRole, StyleTag, TextRange, TriggerDefinition,
    TriggerRegistry, fire,
};
use pretty_assertions::assert_eq;

#[test]
fn test_every_registered_trigger_inserts_its_template_verbatim() {
    let registry = TriggerRegistry::builtin();
    for definition in registry.definitions() {
        let instance = fire(definition.trigger_char(), 0, &registry).unwrap();
        assert_eq!(instance.inserted_text, definition.template());
        assert_eq!(instance.insertion_offset, 0);
        assert_eq!(instance.template_range(), TextRange::new(0, definition.template_len()));
    }
}

#[test]
fn test_todo_trigger_after_hello() {
    let registry = TriggerRegistry::builtin();
    let instance = fire('{', 5, &registry).unwrap();

    assert_eq!(instance.inserted_text, "{ TODO  }");
    let keyword = instance.styled_subranges[0];
    assert_eq!(instance.local_range(&keyword), TextRange::from_len(2, 4));
    assert_eq!(keyword.range, TextRange::from_len(7, 4));
    assert_eq!(instance.cursor, 10);
}

#[test]
fn test_reminder_trigger_on_empty_buffer() {
    let registry = TriggerRegistry::builtin();
    let instance = fire('[', 0, &registry).unwrap();

    assert_eq!(instance.inserted_text, "[ REMINDER  ]");
    let keyword = instance.styled_subranges[0];
    assert_eq!(keyword.tag, StyleTag::Reminder);
    assert_eq!(instance.local_range(&keyword), TextRange::from_len(2, 8));
    assert_eq!(instance.cursor, 5);
}

#[test]
fn test_keyword_subranges_stay_inside_the_template() {
    let registry = TriggerRegistry::builtin();
    for offset in [0, 1, 17, 4096] {
        for definition in registry.definitions() {
            let instance = registry.fire(definition.trigger_char(), offset).unwrap();
            for subrange in &instance.styled_subranges {
                assert!(instance.template_range().contains_range(&subrange.range));
            }
        }
    }
}

#[test]
fn test_non_trigger_characters_are_left_to_the_caller() {
    let registry = TriggerRegistry::builtin();
    for ch in ['a', '}', ']', '(', '\n', ' ', '👋'] {
        assert!(fire(ch, 3, &registry).is_none(), "{ch:?} should not fire");
    }
}

#[test]
fn test_registry_order_decides_shared_triggers() {
    let first = TriggerDefinition::new('{', "{ FIRST }", KeywordRange::new(2, 5), StyleTag::Todo)
        .unwrap();
    let second =
        TriggerDefinition::new('{', "{ SECOND }", KeywordRange::new(2, 6), StyleTag::Reminder)
            .unwrap();

    let forward = TriggerRegistry::new(vec![first.clone(), second.clone()]).unwrap();
    let backward = TriggerRegistry::new(vec![second, first]).unwrap();

    assert_eq!(forward.fire('{', 0).unwrap().inserted_text, "{ FIRST }");
    assert_eq!(backward.fire('{', 0).unwrap().inserted_text, "{ SECOND }");
}

#[test]
fn test_expansion_commands_use_theme_styles() {
    let config = EditorConfig::builtin();
    let instance = config.triggers().fire('[', 2).unwrap();
    let commands = instance.render_commands(config.theme());

    let keyword_style = commands.iter().find_map(|command| match command {
        RenderCommand::ApplyStyle {
            range,
            role: StyleRole::Keyword(tag),
            style,
        } => Some((*range, *tag, style.clone())),
        _ => None,
    });
    assert_eq!(
        keyword_style,
        Some((
            TextRange::new(4, 12),
            StyleTag::Reminder,
            config.theme().reminder.clone()
        ))
    );
}
