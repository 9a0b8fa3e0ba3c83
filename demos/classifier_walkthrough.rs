//! Walkthrough of the query relation classifier
//!
//! This example shows:
//! 1. JOIN through shared variables between two queries
//! 2. JOIN through a shared constant even when the variables differ
//! 3. UNION when only the predicates line up
//! 4. CARTESIAN when nothing is shared
//! 5. How an ontology map promotes or demotes a relation

use rspql_rewriter::{OntologyMap, QueryRelation, QueryRelationClassifier};

fn main() {
    println!("=== Query Relation Classifier Walkthrough ===\n");

    let no_ontology = OntologyMap::new();

    // 1. Both queries bind ?person, so their results can be joined
    let people = r#"
        PREFIX foaf: <http://xmlns.com/foaf/0.1/>
        SELECT ?person ?name WHERE { ?person foaf:name ?name . }
    "#;
    let mailboxes = r#"
        PREFIX foaf: <http://xmlns.com/foaf/0.1/>
        SELECT ?person ?mbox WHERE { ?person foaf:mbox ?mbox . }
    "#;
    let classifier = QueryRelationClassifier::new(people, mailboxes);
    let relation = classifier.decide_instance_relation(&no_ontology);
    println!("Shared variable:   {relation}");
    assert_eq!(relation, QueryRelation::Join);

    // 2. No shared variable, but both queries anchor on ex:Paris
    let lives_in = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?resident WHERE { ?resident ex:livesIn ex:Paris . }
    "#;
    let works_in = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?commuter WHERE { ?commuter ex:worksIn ex:Paris . }
    "#;
    let classifier = QueryRelationClassifier::new(lives_in, works_in);
    let relation = classifier.decide_instance_relation(&no_ontology);
    println!("Shared constant:   {relation}");
    assert_eq!(relation, QueryRelation::Join);

    // 3. Different people, same predicate: the result streams can be unioned
    let alice_friends = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?friend WHERE { ex:Alice ex:knows ?friend . }
    "#;
    let bob_friends = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?pal WHERE { ex:Bob ex:knows ?pal . }
    "#;
    let classifier = QueryRelationClassifier::new(alice_friends, bob_friends);
    let relation = classifier.decide_instance_relation(&no_ontology);
    println!("Shared predicate:  {relation}");
    assert_eq!(relation, QueryRelation::Union);

    // 4. Disjoint vocabularies on disjoint entities
    let trains = r#"
        PREFIX rail: <http://example.org/rail/>
        SELECT ?train WHERE { ?train rail:departsFrom rail:Brussels . }
    "#;
    let weather = r#"
        PREFIX met: <http://example.org/weather/>
        SELECT ?station WHERE { ?station met:reportsRain met:Coast . }
    "#;
    let classifier = QueryRelationClassifier::new(trains, weather);
    let relation = classifier.decide_instance_relation(&no_ontology);
    println!("Nothing shared:    {relation}");
    assert_eq!(relation, QueryRelation::Cartesian);

    // 5. The same two sensor queries flip from UNION to JOIN once the
    // ontology states that both devices observe the same person
    let wearable = r#"
        PREFIX saref: <https://saref.etsi.org/core/>
        PREFIX dahcc: <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/>
        SELECT ?value WHERE {
            ?sensor saref:hasValue ?value .
            ?sensor saref:relatesToProperty dahcc:wearableX .
        }
    "#;
    let smartphone = r#"
        PREFIX saref: <https://saref.etsi.org/core/>
        PREFIX dahcc: <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/>
        SELECT ?value WHERE {
            ?sensor saref:hasValue ?value .
            ?sensor saref:relatesToProperty dahcc:smartphoneX .
        }
    "#;
    let classifier = QueryRelationClassifier::new(wearable, smartphone);
    let relation = classifier.decide_relation(wearable, smartphone, &no_ontology);
    println!("\nDevices without background knowledge: {relation}");

    let ontology = OntologyMap::from_pairs([
        (
            "https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/wearableX",
            "https://example.org/PersonX",
        ),
        (
            "https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/smartphoneX",
            "https://example.org/PersonX",
        ),
    ]);
    let relation = classifier.decide_relation(wearable, smartphone, &ontology);
    println!("Devices mapped to the same person:    {relation}");
    assert_eq!(relation, QueryRelation::Join);
}
