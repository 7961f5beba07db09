use dotalex::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_value_formatter_properties() {
    assert_eq!(
        format_values(&json!("20 21 22"), false, " / "),
        FormattedValue::Levels(vec!["20".into(), "21".into(), "22".into()])
    );
    assert_eq!(format_values(&json!("5 5 5"), false, " / "), FormattedValue::from("5"));
    assert_eq!(format_values(&json!("12.00"), false, " / "), FormattedValue::from("12"));
    assert_eq!(
        format_values(&json!([1, 2]), true, " / "),
        FormattedValue::Levels(vec!["1%".into(), "2%".into()])
    );
}

#[test]
fn test_lookup_is_case_insensitive() {
    let table = json!({ "foo": "bar" });
    assert_eq!(lookup("FOO", &table), Some(&json!("bar")));
}

#[test]
fn test_plain_template_is_stable() {
    let script = json!({});
    let resolver = TemplateResolver::new(&AttributeList::new(), &script, "plain");
    let once = resolver.resolve_text(r"Plain <b>text</b>\nwith a break");
    assert_eq!(once, "Plain text\nwith a break");
    assert_eq!(resolver.resolve_text(&once), once);
}

#[test]
fn test_end_to_end_d_prefix() {
    let attributes = AttributeList::from_value(&json!([{ "damage": 50 }, { "target": "enemies" }]));
    let script = json!({});
    let resolver = TemplateResolver::new(&attributes, &script, "sample");
    assert_eq!(
        resolver.resolve(Some("Deals %damage% to %dtarget%"), false),
        Some(Resolved::Text("Deals 50 to enemies".to_string()))
    );
}

#[test]
fn test_end_to_end_item_categories() {
    let script = json!({});
    let resolver = TemplateResolver::new(&AttributeList::new(), &script, "item_sample");
    let resolved = resolver
        .resolve(Some("<h1>Bonus: Strength</h1>Grants +5 strength"), true)
        .unwrap();

    assert_eq!(
        serde_json::to_value(&resolved).unwrap(),
        json!({ "bonus": [{ "name": "Strength", "desc": "Grants +5 strength" }] })
    );
}

#[test]
fn test_special_formatter_keeps_every_record() {
    let strings = StringTable::from_tokens([("DOTA_Tooltip_ability_x_radius", "RADIUS:")]);
    let attributes = AttributeList::from_value(&json!({
        "01": { "radius": "300" },
        "02": { "duration": "2 3" },
        "03": { "lifetime": "10" }
    }));
    let formatted = format_ability_special(&attributes, &strings, "DOTA_Tooltip_ability_x_");

    assert_eq!(formatted.len(), attributes.len());
    assert!(!formatted[0].generated);
    assert!(formatted[1].generated && formatted[2].generated);
}

#[test]
fn test_substitute_flat_property() {
    let attributes = AttributeList::from_value(&json!([{ "foo": 30 }]));
    assert_eq!(substitute_flat("{s:foo} dmg", &attributes), "30 dmg");
}

#[test]
fn test_vdf_ability_script_through_resolver() {
    let doc = parse_vdf(
        r#"
        "DOTAAbilities"
        {
            "sample_nova"
            {
                "AbilityCooldown"   "14 12 10 8"
                "AbilityValues"
                {
                    "radius"        "300"
                    "slow"
                    {
                        "value"                     "20 30 40 50"
                        "special_bonus_unique_x"    "+10"
                    }
                }
            }
        }
        "#,
    )
    .unwrap();

    let script = &doc["DOTAAbilities"]["sample_nova"];
    let attributes = AttributeList::from_flat_table(script["AbilityValues"].as_object().unwrap());
    let resolver = TemplateResolver::new(&attributes, script, "sample_nova");

    assert_eq!(
        resolver.resolve_text(r"Slows by %slow%%% in %radius%.\nCooldown %abilitycooldown%."),
        "Slows by 20 30 40 50% in 300.\nCooldown 14,12,10,8."
    );
    assert_eq!(lookup_or_key("SLOW", script), "20 30 40 50");
}

#[test]
fn test_localization_feeds_formatter() {
    let strings = StringTable::from_vdf_str(
        r#"
        "lang"
        {
            "Language"  "English"
            "Tokens"
            {
                "DOTA_Tooltip_Ability_item_sample_bonus_damage"  "+$damage"
                "dota_ability_variable_damage"                   "<b>Damage</b>"
            }
        }
        "#,
    )
    .unwrap()
    .strip_markup()
    .normalize_tooltip_case();

    let attributes = AttributeList::from_value(&json!([{ "bonus_damage": "15" }]));
    let formatted =
        format_ability_special(&attributes, &strings, "DOTA_Tooltip_ability_item_sample_");

    assert_eq!(
        serde_json::to_value(&formatted).unwrap(),
        json!([{ "key": "bonus_damage", "header": "+", "value": "15", "footer": "Damage" }])
    );
}
