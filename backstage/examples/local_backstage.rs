//! Drives a backstage over the local filesystem from the terminal.
//!
//! Run with `RUST_LOG=backstage=debug cargo run -p backstage --example local_backstage [DIR]`.
//! Saves are printed instead of written.

use std::cell::RefCell;

use backstage::{
    Backstage, BackstageConfig, BrowseResponse, BrowseTarget, BrowserEvent, DirectorySource,
    DocumentInfo, Host, HostError, NavKey, Purpose, SaveOptions, StdDirectorySource,
};
use tracing_subscriber::{EnvFilter, fmt};

struct LocalHost {
    source: StdDirectorySource,
    doc: RefCell<DocumentInfo>,
}

impl Host for LocalHost {
    async fn open(&self, path: &str) -> Result<(), HostError> {
        println!("open {path:?}");
        let mut doc = self.doc.borrow_mut();
        doc.path = (!path.is_empty()).then(|| path.to_string());
        Ok(())
    }

    async fn save(&self, path: &str, options: SaveOptions, overwrite: bool) -> Result<(), HostError> {
        println!("save {path:?} export={} overwrite={overwrite}", options.export);
        if !options.export {
            self.doc.borrow_mut().path = Some(path.to_string());
        }
        Ok(())
    }

    async fn browse(&self, target: &BrowseTarget) -> Result<BrowseResponse, HostError> {
        self.source.list(target)
    }

    fn document(&self) -> DocumentInfo {
        self.doc.borrow().clone()
    }
}

fn print_browser(b: &Backstage<LocalHost>, purpose: Purpose) {
    let browser = b.browser(purpose);
    println!(
        "[{}] {}",
        purpose.as_str(),
        b.cursor().path().unwrap_or("<none>")
    );
    if let Some(err) = b.cursor().error_message() {
        println!("  ! {err}");
    } else if let Some(hint) = browser.empty_hint() {
        println!("  {hint}");
    }
    for (i, entry) in browser.rows().iter().enumerate() {
        let marker = if browser.selection().selected() == Some(i) {
            ">"
        } else {
            " "
        };
        println!("  {marker} {:?} {}", entry.kind, entry.name);
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "backstage=debug,warn".into());
    fmt().with_env_filter(filter).with_target(true).init();

    let mut source = StdDirectorySource::new();
    if let Some(dir) = std::env::args().nth(1) {
        source = source.with_home(dir);
    }
    let host = LocalHost {
        source,
        doc: RefCell::new(DocumentInfo {
            title: "Untitled".into(),
            ..DocumentInfo::default()
        }),
    };
    let mut backstage = Backstage::new(host, BackstageConfig::default());

    pollster::block_on(async {
        backstage.activate();
        if let Err(err) = backstage.set_operation("export").await {
            eprintln!("export: {err}");
            return;
        }
        print_browser(&backstage, Purpose::Export);

        backstage.browser_mut(Purpose::Export).set_viewport(200.0, 20.0);
        let _ = backstage
            .browser_event(Purpose::Export, BrowserEvent::Click(0))
            .await;
        let _ = backstage
            .browser_event(Purpose::Export, BrowserEvent::Key(NavKey::Down))
            .await;
        print_browser(&backstage, Purpose::Export);

        // Untitled documents have no path: this lands on Save As.
        if let Err(err) = backstage.request_save(()).await {
            println!("save: {err}");
        }
        println!(
            "operation={} place={} suggested={:?}",
            backstage.operation(),
            backstage.place(),
            backstage.browser(Purpose::Save).save_name()
        );

        let _ = backstage
            .browser_event(Purpose::Save, BrowserEvent::SaveClicked)
            .await;
        for event in backstage.drain_events() {
            println!("event {event:?}");
        }
    });
}
