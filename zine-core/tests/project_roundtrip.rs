//! Integration tests for the export/import round-trip law and the documented
//! end-to-end editing scenario.

use zine_core::codec::{export_json, export_project_data, import_from_json, import_from_value};
use zine_core::{
    ConfigInput, ImportOptions, LayoutCatalog, NewMediaAsset, NewTextElement, TextPreset,
    TextStylePatch, Unit, ZineDocument,
};

fn a5_doc() -> ZineDocument {
    let mut doc = ZineDocument::new();
    doc.initialize(&ConfigInput {
        width: 210.0,
        height: 297.0,
        unit: Some(Unit::Mm),
        bleed: Some(3.0),
        margin: Some(10.0),
        ..ConfigInput::default()
    });
    doc
}

// ===========================================================================
// The documented scenario: init, add a two-up page, assign one asset, export
// ===========================================================================

#[test]
fn scenario_two_up_page_with_one_asset() {
    let catalog = LayoutCatalog::with_builtins();
    let two_up = catalog.get_by_id("two-vertical").expect("builtin");

    let mut doc = a5_doc();
    doc.add_media_asset(NewMediaAsset {
        id: Some("assetA".to_string()),
        name: "a.jpg".to_string(),
        url: "/uploads/a.jpg".to_string(),
        media_type: "image/jpeg".to_string(),
        ..NewMediaAsset::default()
    });
    let page_id = doc.add_page(two_up);
    doc.set_asset_to_slot(&page_id, 0, Some("assetA".to_string()));

    let exported = serde_json::to_value(export_project_data(&doc)).expect("encode");
    assert_eq!(exported["pages"][0]["slots"][0]["assetId"], "assetA");
    assert!(exported["pages"][0]["slots"][1]["assetId"].is_null());

    // Removing the asset leaves the exported reference dangling
    doc.remove_media_asset("assetA");
    let exported = serde_json::to_value(export_project_data(&doc)).expect("encode");
    assert_eq!(exported["pages"][0]["slots"][0]["assetId"], "assetA");
    assert!(exported["mediaAssets"].as_array().expect("array").is_empty());
}

// ===========================================================================
// Round-trip law: import(export(D)) reproduces D for mutator-built documents
// ===========================================================================

#[test]
fn round_trip_preserves_mutator_built_document() {
    let catalog = LayoutCatalog::with_builtins();

    // Build a document exercising a broad slice of the mutation protocol
    let mut doc = a5_doc();
    doc.add_media_asset(NewMediaAsset {
        id: Some("assetA".to_string()),
        name: "a.jpg".to_string(),
        url: "/uploads/a-display.jpg".to_string(),
        media_type: "image/jpeg".to_string(),
        original_url: Some("/uploads/a-original.jpg".to_string()),
        thumbnail: Some("/uploads/a-thumb.jpg".to_string()),
        image_id: Some("img_1".to_string()),
        ..NewMediaAsset::default()
    });

    let cover = doc.add_page(catalog.get_by_id("cover-title").expect("builtin"));
    let spread = doc.add_page(catalog.get_by_id("grid-2x2").expect("builtin"));

    doc.set_asset_to_slot(&spread, 2, Some("assetA".to_string()));
    doc.toggle_slot_fit(&spread, 2);
    doc.set_slot_inner_margin(&spread, 1, 24.0);
    doc.set_slot_background_color(&spread, 0, Some("#ffeecc".to_string()));
    doc.apply_text_preset(&spread, 3, TextPreset::Quote);
    doc.bring_slot_to_front(&cover, 0);
    doc.add_text_element(
        &spread,
        NewTextElement {
            content: Some("Caption".to_string()),
            style: Some(TextStylePatch {
                font_size: Some(12.0),
                ..TextStylePatch::default()
            }),
            ..NewTextElement::default()
        },
    );
    doc.duplicate_page(&cover);
    doc.reorder_pages(2, 1);
    doc.set_page_margin_override(&spread, Some(6.0));

    // Round-trip through the JSON string form
    let json = export_json(&doc, true).expect("export");
    let mut imported = ZineDocument::new();
    import_from_json(&mut imported, &json, ImportOptions::default()).expect("import");

    assert_eq!(imported.config(), doc.config());
    assert_eq!(imported.media_assets(), doc.media_assets());
    assert_eq!(imported.pages(), doc.pages());

    // A second round trip is a fixed point
    let json2 = export_json(&imported, false).expect("re-export");
    let mut again = ZineDocument::new();
    import_from_json(&mut again, &json2, ImportOptions::default()).expect("re-import");
    assert_eq!(again.pages(), imported.pages());
}

#[test]
fn round_trip_resets_transient_upload_state() {
    let mut doc = a5_doc();
    let pending = doc.add_media_asset(NewMediaAsset {
        name: "up.jpg".to_string(),
        url: "blob:pending".to_string(),
        media_type: "image/jpeg".to_string(),
        is_uploading: true,
        ..NewMediaAsset::default()
    });
    doc.set_media_upload_progress(&pending, 40.0);

    let value = serde_json::to_value(export_project_data(&doc)).expect("encode");
    let mut imported = ZineDocument::new();
    import_from_value(&mut imported, &value, ImportOptions::default()).expect("import");

    let asset = &imported.media_assets()[0];
    assert!(!asset.is_uploading);
    assert!(asset.upload_progress.is_none());
}

#[test]
fn round_trip_excludes_clipboard_selection_and_ui() {
    let catalog = LayoutCatalog::with_builtins();
    let mut doc = a5_doc();
    let first = doc.add_page(catalog.get_by_id("full-page").expect("builtin"));
    let second = doc.add_page(catalog.get_by_id("full-page").expect("builtin"));
    doc.copy_page(&first);
    doc.select_page(second.clone());
    doc.toggle_theme();

    let json = export_json(&doc, false).expect("export");
    assert!(!json.contains("copiedPage"));
    assert!(!json.contains("selectedPageId"));
    assert!(!json.contains("showGuides"));

    let mut imported = ZineDocument::new();
    import_from_json(&mut imported, &json, ImportOptions::default()).expect("import");

    // Selection restarts at the first page; clipboard and UI are fresh
    assert_eq!(imported.selected_page_id(), Some(first.as_str()));
    assert!(imported.copied_page().is_none());
    assert_eq!(imported.ui().theme, zine_core::Theme::Light);
}
