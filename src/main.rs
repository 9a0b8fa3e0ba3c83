use rspql_rewriter::{OntologyMap, QueryCombiner, QueryRelationClassifier};

fn main() {
    // Two continuous queries reading the same observation subject through
    // different devices
    let wearable_query = r#"
    PREFIX saref: <https://saref.etsi.org/core/>
    PREFIX dahcc: <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/>
    SELECT ?value WHERE {
        ?sensor saref:hasValue ?value .
        ?sensor saref:relatesToProperty dahcc:wearableX .
    }
    "#;
    let smartphone_query = r#"
    PREFIX saref: <https://saref.etsi.org/core/>
    PREFIX dahcc: <https://dahcc.idlab.ugent.be/Homelab/SensorsAndActuators/>
    SELECT ?value WHERE {
        ?sensor saref:hasValue ?value .
        ?sensor saref:relatesToProperty dahcc:smartphoneX .
    }
    "#;

    let classifier = QueryRelationClassifier::new(wearable_query, smartphone_query);

    // Without background knowledge the shared variables carry different
    // meanings, so the queries stay apart
    let relation = classifier.decide_instance_relation(&OntologyMap::new());
    println!("Without ontology: {relation}");

    // The ontology maps both device properties onto the same person, which
    // lets the classifier line the queries up
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
    let relation = classifier.decide_instance_relation(&ontology);
    println!("With ontology: {relation}");

    // Merge two continuous queries over the same window into one
    let mut combiner = QueryCombiner::new();
    combiner.add_query(
        r#"
    PREFIX ex: <https://rsp.rs/>
    REGISTER RStream <output> AS
    SELECT ?temperature
    FROM NAMED WINDOW ex:w1 ON STREAM ex:sensors [RANGE 10000 STEP 2000]
    WHERE {
        WINDOW ex:w1 { ?sensor ex:hasTemperature ?temperature . }
    }
    "#,
    );
    combiner.add_query(
        r#"
    PREFIX ex: <https://rsp.rs/>
    REGISTER RStream <output> AS
    SELECT ?humidity
    FROM NAMED WINDOW ex:w1 ON STREAM ex:sensors [RANGE 10000 STEP 2000]
    WHERE {
        WINDOW ex:w1 { ?sensor ex:hasHumidity ?humidity . }
    }
    "#,
    );

    let merged = combiner
        .combine(true)
        .and_then(|combined| combiner.parsed_to_string(&combined));
    match merged {
        Ok(text) => {
            println!();
            println!("{text}");
        }
        Err(error) => eprintln!("could not combine the queries: {error}"),
    }
}
