//! Combining continuous queries over sensor streams
//!
//! This example shows:
//! 1. Joining two queries that read the same window and the same subject
//! 2. Unioning two queries on one window when their subjects differ
//! 3. Unioning queries that read different windows
//! 4. Serializing the combined query back to RSP-QL text
//! 5. Rewriting a query's window to a new chunk size

use rspql_rewriter::{ChunkQueryRewriter, QueryCombiner, RSPQLParser};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Combining Continuous Queries ===\n");

    // 1. Same window, same subject variable: the bodies are joined inside
    // a single WINDOW block
    let temperature = r#"
        PREFIX ex: <https://rsp.rs/>
        REGISTER RStream <output> AS
        SELECT ?temperature
        FROM NAMED WINDOW ex:w1 ON STREAM ex:sensors [RANGE 10000 STEP 2000]
        WHERE {
            WINDOW ex:w1 { ?sensor ex:hasTemperature ?temperature . }
        }
    "#;
    let humidity = r#"
        PREFIX ex: <https://rsp.rs/>
        REGISTER RStream <output> AS
        SELECT ?humidity
        FROM NAMED WINDOW ex:w1 ON STREAM ex:sensors [RANGE 10000 STEP 2000]
        WHERE {
            WINDOW ex:w1 { ?sensor ex:hasHumidity ?humidity . }
        }
    "#;

    let mut combiner = QueryCombiner::new();
    combiner.add_query(temperature);
    combiner.add_query(humidity);
    let joined = combiner.combine(true)?;
    println!("--- Joined inside one window ---");
    println!("{}\n", combiner.parsed_to_string(&joined)?);

    // 2. Same window but different subjects: with a strict subject match
    // the bodies become alternatives inside the shared window
    let doors = r#"
        PREFIX ex: <https://rsp.rs/>
        REGISTER RStream <output> AS
        SELECT ?state
        FROM NAMED WINDOW ex:w1 ON STREAM ex:sensors [RANGE 10000 STEP 2000]
        WHERE {
            WINDOW ex:w1 { ?door ex:hasState ?state . }
        }
    "#;
    combiner.clear_queries();
    combiner.add_query(temperature);
    combiner.add_query(doors);
    let unioned = combiner.combine(true)?;
    println!("--- Unioned inside one window ---");
    println!("{}\n", combiner.parsed_to_string(&unioned)?);

    // 3. Different windows: each query keeps its own WINDOW block and the
    // blocks become alternatives
    let heart_rate = r#"
        PREFIX ex: <https://rsp.rs/>
        REGISTER RStream <output> AS
        SELECT ?bpm
        FROM NAMED WINDOW ex:w2 ON STREAM ex:wearable [RANGE 5000 STEP 1000]
        WHERE {
            WINDOW ex:w2 { ?monitor ex:hasHeartRate ?bpm . }
        }
    "#;
    combiner.clear_queries();
    combiner.add_query(temperature);
    combiner.add_query(heart_rate);
    let split = combiner.combine(true)?;
    println!("--- Unioned across two windows ---");
    println!("{}\n", combiner.parsed_to_string(&split)?);

    // 4. The serialized text is itself a parseable RSP-QL query, so it can
    // be fed back into the parser or an RSP engine
    let reparsed = RSPQLParser::new(combiner.parsed_to_string(&joined)?).parse();
    assert_eq!(reparsed.s2r, joined.s2r);
    assert_eq!(reparsed.projection_variables, joined.projection_variables);
    println!("--- Round trip ---");
    println!("The joined query parses back to the same windows and projection.\n");

    // 5. Rewrite the window of the temperature query to 30 second chunks
    // sliding every 15 seconds
    let rewriter = ChunkQueryRewriter::new(15000, 30000);
    let rewritten = rewriter.rewrite_with_chunk_size(temperature);
    println!("--- Rewritten to a new chunk size ---");
    println!("{rewritten}");

    Ok(())
}
