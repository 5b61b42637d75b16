//! Subcommand execution.

use anyhow::{anyhow, Context};
use shelf_client::ShelfClient;
use shelf_protocol::{Link, MetadataProperty, PropertyName, SearchCriteria, Transport};
use tokio::io::AsyncWriteExt;

use crate::args::Command;

/// Runs one subcommand, writing its result to stdout.
pub async fn run<T: Transport>(client: &ShelfClient<T>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Get { path, output } => {
            let body = client.get_artifact(&path).await?;
            match output {
                Some(file) => tokio::fs::write(&file, &body)
                    .await
                    .with_context(|| format!("failed to write {}", file.display()))?,
                None => {
                    let mut stdout = tokio::io::stdout();
                    stdout.write_all(&body).await?;
                    stdout.flush().await?;
                }
            }
        }
        Command::List { path } => print_links(&client.list_artifact(&path).await?),
        Command::Upload { path, file } => {
            let content = tokio::fs::File::open(&file)
                .await
                .with_context(|| format!("failed to open {}", file.display()))?;
            client.upload_artifact(&path, content).await?;
            tracing::info!(path = %path, "Artifact uploaded");
        }
        Command::Search {
            path,
            filters,
            sorts,
            limit,
        } => {
            let criteria = SearchCriteria {
                search: filters,
                sort: sorts,
                limit,
            };
            print_links(&client.search(&path, &criteria).await?);
        }
        Command::Meta {
            path,
            property: None,
        } => {
            for property in client.get_metadata(&path).await?.values() {
                println!("{property}");
            }
        }
        Command::Meta {
            path,
            property: Some(name),
        } => {
            let name = property_name(name)?;
            println!("{}", client.get_metadata_property(&path, &name).await?);
        }
        Command::SetMeta {
            path,
            name,
            value,
            immutable,
            create,
        } => {
            let property = MetadataProperty::new(property_name(name)?, value, immutable);
            let stored = if create {
                client.create_metadata_property(&path, &property).await?
            } else {
                client.update_metadata_property(&path, &property).await?
            };
            println!("{stored}");
        }
    }
    Ok(())
}

fn property_name(name: String) -> anyhow::Result<PropertyName> {
    PropertyName::new(name).ok_or_else(|| anyhow!("property name must not be empty"))
}

fn print_links(links: &[Link]) {
    for link in links {
        println!("{link}");
    }
}
