//! End-to-end import scenarios against the in-memory and file stores.

use railcat::{
    import_csv_batch, import_roster_batch, AuditEventType, CsvTarget, JsonFileStore, LocomotiveSummary,
    LocomotiveType, MemoryStore, Store,
};
use tempfile::tempdir;

/// Sound-equipped railcar whose name only exists as packed ASCII CVs.
const FERROBUS_ROSTER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet type="text/xsl" href="/xml/XSLT/locomotive.xsl"?>
<locomotive-config>
  <locomotive id="Ferrobus 591" fileName="Ferrobus_591.xml" roadNumber="591.510"
              roadName="" mfg="Electrotren" model="E2400" dccAddress="5" comment="Digitalizado 2023">
    <decoder model="LokSound 5 DCC" family="ESU LokSound 5" comment=""/>
    <locoaddress><number>5</number></locoaddress>
    <functionlabels>
      <functionlabel num="0" lockable="true">Luces</functionlabel>
      <functionlabel num="1" lockable="true">Sonido motor</functionlabel>
      <functionlabel num="2" lockable="false">Bocina</functionlabel>
    </functionlabels>
    <soundlabels>
      <soundlabel num="1">Motor</soundlabel>
      <soundlabel num="8">Chirrido frenos</soundlabel>
    </soundlabels>
    <values>
      <CVvalue name="1" value="5"/>
      <CVvalue name="3" value="20"/>
      <CVvalue name="16.2.5" value="1"/>
      <CVvalue name="99" value="4"/>
      <CVvalue name="29" value="6"/>
      <CVvalue name="1.0.261" value="70"/>
      <CVvalue name="1.0.262" value="101"/>
      <CVvalue name="1.0.263" value="114"/>
      <CVvalue name="1.0.264" value="114"/>
      <CVvalue name="1.0.265" value="111"/>
      <CVvalue name="1.0.266" value="98"/>
      <CVvalue name="1.0.267" value="117"/>
      <CVvalue name="1.0.268" value="115"/>
      <CVvalue name="1.0.269" value="0"/>
    </values>
  </locomotive>
</locomotive-config>"#;

const BR218_ROSTER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<locomotive-config>
  <locomotive mfg="ESU" roadName="BR 218" dccAddress="218"/>
</locomotive-config>"#;

#[tokio::test]
async fn test_minimal_roster_imports_as_diesel() {
    let store = MemoryStore::new();
    let report = import_roster_batch(&store, &[BR218_ROSTER.to_string()]).await.unwrap();

    assert!(report.success);
    assert_eq!(
        report.imported_items,
        vec![LocomotiveSummary {
            brand: "ESU".into(),
            model: "BR 218".into(),
            dcc_address: 218,
        }]
    );
    assert_eq!(store.locomotives().await[0].record.locomotive_type, LocomotiveType::Diesel);
}

#[tokio::test]
async fn test_full_roster_normalization() {
    let store = MemoryStore::new();
    let report = import_roster_batch(&store, &[FERROBUS_ROSTER.to_string()]).await.unwrap();
    assert_eq!(report.imported_count, 1);

    let stored = store.locomotives().await;
    let loco = &stored[0].record;

    assert_eq!(loco.brand, "Electrotren");
    assert_eq!(loco.model, "Ferrobus");
    assert_eq!(loco.reference, "E2400");
    assert_eq!(loco.registration_number, "591.510");
    assert_eq!(loco.dcc_address, 5);
    assert_eq!(loco.notes, "Digitalizado 2023");
    assert_eq!(loco.locomotive_type, LocomotiveType::Automotor);
    assert_eq!(loco.prototype_type, "Ferrobus");
    assert_eq!(loco.decoder_brand, "ESU");
    assert_eq!(loco.decoder_model, "LokSound 5 DCC");
    assert_eq!(loco.sound_project, "ESU - Ferrobus");

    let functions: Vec<(&str, bool)> = loco
        .functions
        .iter()
        .map(|f| (f.function_number.as_str(), f.is_sound))
        .collect();
    assert_eq!(
        functions,
        vec![("F0", false), ("F1", true), ("F2", false), ("F8", true)]
    );
    assert_eq!(loco.functions[1].description, "Sonido motor");

    let cvs: Vec<(u32, i64)> = loco
        .cv_modifications
        .iter()
        .map(|cv| (cv.cv_number, cv.value))
        .collect();
    assert_eq!(cvs, vec![(1, 5), (3, 20), (29, 6)]);

    let history = store.audit_history(50).await.unwrap();
    assert_eq!(history[0].decoders_count, 1);
    assert_eq!(history[0].sound_projects_count, 1);
}

#[tokio::test]
async fn test_malformed_then_valid() {
    let store = MemoryStore::new();
    let documents = vec!["<malformed>".to_string(), BR218_ROSTER.to_string()];
    let report = import_roster_batch(&store, &documents).await.unwrap();

    assert!(report.success);
    assert_eq!(report.imported_count, 1);
    assert_eq!(report.skipped_count, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("Archivo 1: "));
}

#[tokio::test]
async fn test_bad_and_good_documents_keep_order() {
    let store = MemoryStore::new();
    let documents = vec![
        FERROBUS_ROSTER.to_string(),
        "plain text".to_string(),
        BR218_ROSTER.to_string(),
        "<roster><entry/></roster>".to_string(),
        String::new(),
    ];
    let report = import_roster_batch(&store, &documents).await.unwrap();

    assert_eq!(report.imported_count, 2);
    assert_eq!(report.skipped_count, 3);
    assert_eq!(report.errors.len(), 3);

    let models: Vec<&str> = report.imported_items.iter().map(|s| s.model.as_str()).collect();
    assert_eq!(models, vec!["Ferrobus", "BR 218"]);

    let indices: Vec<&str> = report
        .errors
        .iter()
        .map(|e| e.split(':').next().unwrap_or_default())
        .collect();
    assert_eq!(indices, vec!["Archivo 2", "Archivo 4", "Archivo 5"]);
}

#[tokio::test]
async fn test_locomotive_csv_missing_address() {
    let store = MemoryStore::new();
    let csv = "\u{feff}Brand,Model,Reference,DCC_Address,Locomotive_Type\n\
               Roco,BR 218,73400,,diesel\n\
               Mabar,269 Renfe,81602,269,electrica\n";
    let report = import_csv_batch(&store, CsvTarget::Locomotives, csv).await.unwrap();

    assert!(report.success);
    assert_eq!(report.imported_count, 1);
    assert_eq!(report.skipped_count, 1);
    assert!(report.errors[0].starts_with("Fila 1: "));
    assert_eq!(report.imported_items[0].reference, "81602");

    let history = store.audit_history(50).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].event_type, AuditEventType::CsvImport);
    assert_eq!(history[0].locomotives_count, 1);
    assert_eq!(history[0].skipped_count, 1);
}

#[tokio::test]
async fn test_file_store_persists_imports_and_history() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::with_dir(dir.path());

    import_roster_batch(&store, &[BR218_ROSTER.to_string()]).await.unwrap();
    import_csv_batch(
        &store,
        CsvTarget::RollingStock,
        "brand,model,reference\nArnold,Tolva,HN6123\n",
    )
    .await
    .unwrap();

    let locomotives = std::fs::read_dir(dir.path().join("locomotives")).unwrap().count();
    let rolling_stock = std::fs::read_dir(dir.path().join("rolling_stock")).unwrap().count();
    assert_eq!((locomotives, rolling_stock), (1, 1));

    let history = store.audit_history(50).await.unwrap();
    assert_eq!(history.len(), 2);
    let mut kinds: Vec<AuditEventType> = history.iter().map(|e| e.event_type).collect();
    kinds.sort_by_key(|k| format!("{:?}", k));
    assert_eq!(kinds, vec![AuditEventType::CsvImport, AuditEventType::XmlImport]);
}
