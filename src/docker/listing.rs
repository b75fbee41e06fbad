use super::command::Runtime;
use crate::models::ContainerRef;

/// Template asking the runtime for `<id> <name>` per running container
pub const LIST_FORMAT: &str = "{{.ID}} {{.Names}}";

/// Parsed listing output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub containers: Vec<ContainerRef>,
    /// Non-empty lines that did not split into exactly two fields
    pub dropped: usize,
}

/// Parse `<id> <name>` lines; lines with any other field count are skipped
pub fn parse_listing(output: &str) -> Listing {
    let mut listing = Listing::default();

    for line in output.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(' ').collect();
        match fields.as_slice() {
            [id, name] => listing.containers.push(ContainerRef::new(*id, *name)),
            _ => {
                tracing::warn!(line, fields = fields.len(), "skipping malformed listing line");
                listing.dropped += 1;
            }
        }
    }

    listing
}

impl Runtime {
    /// Running containers, or an empty list if the runtime could not be queried
    pub async fn running_containers(&self) -> Vec<ContainerRef> {
        self.list_containers(false).await
    }

    /// Containers in any state (`ps -a`), for picking one to start
    pub async fn all_containers(&self) -> Vec<ContainerRef> {
        self.list_containers(true).await
    }

    async fn list_containers(&self, all: bool) -> Vec<ContainerRef> {
        let args: &[&str] = if all {
            &["ps", "-a", "--format", LIST_FORMAT]
        } else {
            &["ps", "--format", LIST_FORMAT]
        };

        match self.output(args).await {
            Ok(stdout) => {
                let listing = parse_listing(&stdout);
                if listing.dropped > 0 {
                    tracing::warn!(dropped = listing.dropped, "listing contained malformed lines");
                }
                tracing::debug!(count = listing.containers.len(), all, "listed containers");
                listing.containers
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to list containers");
                Vec::new()
            }
        }
    }
}
