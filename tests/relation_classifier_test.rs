use rspql_rewriter::{OntologyMap, QueryRelation, QueryRelationClassifier};

fn classifier() -> QueryRelationClassifier {
    QueryRelationClassifier::new("", "")
}

#[test]
fn test_join_when_queries_share_variables() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?person WHERE {
            ?person ex:name "Alice" .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?person WHERE {
            ?person ex:age 25 .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Join);
}

#[test]
fn test_join_when_queries_share_constants() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x WHERE {
            ?x ex:livesIn ex:Paris .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?y WHERE {
            ?y ex:worksIn ex:Paris .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Join);
}

#[test]
fn test_join_through_ontology_mapping() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?data WHERE {
            ?data ex:source <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/wearableX> .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?info WHERE {
            ?info ex:origin <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/smartphoneX> .
        }
    "#;

    let ontology = OntologyMap::from_pairs([
        (
            "https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/wearableX",
            "PersonX",
        ),
        (
            "https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/smartphoneX",
            "PersonX",
        ),
    ]);

    let result = classifier().decide_relation(query_a, query_b, &ontology);
    assert_eq!(result, QueryRelation::Join);
}

#[test]
fn test_join_with_complex_shared_variables() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?person ?name WHERE {
            ?person ex:name ?name .
            ?person ex:type ex:Student .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?person ?age WHERE {
            ?person ex:age ?age .
            ?person ex:grade ex:A .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Join);
}

#[test]
fn test_union_when_queries_share_predicates_only() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x WHERE {
            ?x ex:name "Alice" .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?y WHERE {
            ?y ex:name "Bob" .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Union);
}

#[test]
fn test_union_for_same_predicate_structure() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?student WHERE {
            ?student ex:studies ex:Mathematics .
            ?student ex:year 2023 .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?pupil WHERE {
            ?pupil ex:studies ex:Physics .
            ?pupil ex:year 2024 .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Union);
}

#[test]
fn test_union_with_overlapping_predicates() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x ?name WHERE {
            ?x ex:name ?name .
            ?x ex:department ex:CS .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?y ?title WHERE {
            ?y ex:name ?title .
            ?y ex:position ex:Professor .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Union);
}

#[test]
fn test_cartesian_for_unrelated_queries() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?person WHERE {
            ?person ex:name "Alice" .
        }
    "#;
    let query_b = r#"
        PREFIX weather: <http://weather.org/>
        SELECT ?temp WHERE {
            ?temp weather:celsius 25 .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Cartesian);
}

#[test]
fn test_cartesian_for_different_domains() {
    let query_a = r#"
        PREFIX book: <http://book.org/>
        SELECT ?book WHERE {
            ?book book:author "Tolkien" .
            ?book book:genre book:Fantasy .
        }
    "#;
    let query_b = r#"
        PREFIX car: <http://car.org/>
        SELECT ?vehicle WHERE {
            ?vehicle car:brand car:Toyota .
            ?vehicle car:color car:Red .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Cartesian);
}

#[test]
fn test_different_variable_names_without_other_overlap() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?alice WHERE {
            ?alice ex:name "Alice" .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?bob WHERE {
            ?bob ex:age 25 .
        }
    "#;

    // Different predicates and no shared constants
    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Cartesian);
}

#[test]
fn test_renamed_variables_with_same_structure() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x ?y WHERE {
            ?x ex:knows ?y .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?a ?b WHERE {
            ?a ex:knows ?b .
        }
    "#;

    // Same shape and predicate, but no variable name in common
    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Union);
}

#[test]
fn test_ontology_mapping_changes_the_relation() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?data WHERE {
            ?data ex:from <https://sensor1.example.org> .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?info WHERE {
            ?info ex:from <https://sensor2.example.org> .
        }
    "#;

    let ontology = OntologyMap::from_pairs([
        ("https://sensor1.example.org", "Device1"),
        ("https://sensor2.example.org", "Device1"),
    ]);

    let with_ontology = classifier().decide_relation(query_a, query_b, &ontology);
    assert_eq!(with_ontology, QueryRelation::Join);

    let without_ontology = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(without_ontology, QueryRelation::Union);
}

#[test]
fn test_partial_ontology_mapping() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x WHERE {
            ?x ex:device <https://sensor1.example.org> .
            ?x ex:location <https://room1.example.org> .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?y WHERE {
            ?y ex:device <https://sensor2.example.org> .
            ?y ex:location <https://room2.example.org> .
        }
    "#;

    // The rooms stay unmapped, the sensors collapse onto one type
    let ontology = OntologyMap::from_pairs([
        ("https://sensor1.example.org", "SensorType1"),
        ("https://sensor2.example.org", "SensorType1"),
    ]);

    let result = classifier().decide_relation(query_a, query_b, &ontology);
    assert_eq!(result, QueryRelation::Join);
}

#[test]
fn test_instance_relation_uses_stored_queries() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x WHERE {
            ?x ex:name "Alice" .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x WHERE {
            ?x ex:age 25 .
        }
    "#;

    let instance = QueryRelationClassifier::new(query_a, query_b);
    let result = instance.decide_instance_relation(&OntologyMap::new());
    assert_eq!(result, QueryRelation::Join);
}

#[test]
fn test_instance_relation_with_ontology() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?data WHERE {
            ?data ex:source <https://wearable.example.org> .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?info WHERE {
            ?info ex:source <https://smartphone.example.org> .
        }
    "#;

    let ontology = OntologyMap::from_pairs([
        ("https://wearable.example.org", "PersonDevice"),
        ("https://smartphone.example.org", "PersonDevice"),
    ]);

    let instance = QueryRelationClassifier::new(query_a, query_b);
    let result = instance.decide_instance_relation(&ontology);
    assert_eq!(result, QueryRelation::Join);
}

#[test]
fn test_cartesian_with_multiple_triples() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?person ?name ?age WHERE {
            ?person ex:name ?name .
            ?person ex:age ?age .
            ?person ex:type ex:Student .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?student ?course WHERE {
            ?student ex:enrolledIn ?course .
            ?student ex:semester ex:Spring2024 .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Cartesian);
}

#[test]
fn test_blank_nodes_count_as_constants() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x WHERE {
            ?x ex:hasAddress _:addr1 .
            _:addr1 ex:street "Main St" .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?y WHERE {
            ?y ex:hasAddress _:addr2 .
            _:addr2 ex:city "Boston" .
        }
    "#;

    // Different blank node labels, so only the predicate overlaps
    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Union);
}

#[test]
fn test_literal_values_are_compared() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x WHERE {
            ?x ex:score 95 .
            ?x ex:subject "Math" .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?y WHERE {
            ?y ex:score 87 .
            ?y ex:subject "Physics" .
        }
    "#;

    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Union);
}

#[test]
fn test_malformed_query_degrades_to_cartesian() {
    let malformed = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?x WHERE {
            INVALID SYNTAX
        }
    "#;
    let valid = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?y WHERE {
            ?y ex:name "Alice" .
        }
    "#;

    let result = classifier().decide_relation(malformed, valid, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Cartesian);
}

#[test]
fn test_shared_variable_bound_to_different_entities() {
    let query_a = r#"
        PREFIX saref: <https://saref.etsi.org/core/>
        PREFIX dahccsensors: <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/>
        SELECT ?value WHERE {
            ?s1 saref:hasValue ?value .
            ?s1 saref:relatesToProperty dahccsensors:wearableX .
        }
    "#;
    let query_b = r#"
        PREFIX saref: <https://saref.etsi.org/core/>
        PREFIX dahccsensors: <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/>
        SELECT ?value WHERE {
            ?s2 saref:hasValue ?value .
            ?s2 saref:relatesToProperty dahccsensors:smartphoneX .
        }
    "#;

    // ?value reads from two different devices, so sharing the name is not
    // enough to join
    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Union);
}

#[test]
fn test_shared_variable_unified_through_ontology() {
    let query_a = r#"
        PREFIX saref: <https://saref.etsi.org/core/>
        PREFIX dahccsensors: <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/>
        SELECT ?value WHERE {
            ?s1 saref:hasValue ?value .
            ?s1 saref:relatesToProperty dahccsensors:wearableX .
        }
    "#;
    let query_b = r#"
        PREFIX saref: <https://saref.etsi.org/core/>
        PREFIX dahccsensors: <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/>
        SELECT ?value WHERE {
            ?s2 saref:hasValue ?value .
            ?s2 saref:relatesToProperty dahccsensors:smartphoneX .
        }
    "#;

    let ontology = OntologyMap::from_pairs([
        (
            "https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/wearableX",
            "PersonX",
        ),
        (
            "https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/smartphoneX",
            "PersonX",
        ),
    ]);

    let result = classifier().decide_relation(query_a, query_b, &ontology);
    assert_eq!(result, QueryRelation::Join);
}

#[test]
fn test_shared_variable_without_binding_context() {
    let query_a = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?person WHERE {
            ?person ex:name "Alice" .
        }
    "#;
    let query_b = r#"
        PREFIX ex: <http://example.org/>
        SELECT ?person WHERE {
            ?person ex:age 25 .
        }
    "#;

    // No entity-binding predicates around ?person, so the shared name wins
    let result = classifier().decide_relation(query_a, query_b, &OntologyMap::new());
    assert_eq!(result, QueryRelation::Join);
}
