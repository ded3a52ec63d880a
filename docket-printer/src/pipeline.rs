//! Print pipeline: selection-checked, serialized hardware operations
//!
//! Every operation that touches hardware follows the same path: require a
//! Selection, take that printer's send lock, flatten the job, dispatch. A
//! transport failure surfaces as a typed error; the in-band result with its
//! byte accounting is returned on success.

use crate::error::{PrinterError, PrinterResult};
use crate::registry::PrinterRegistry;
use crate::transport::{self, TransportConfig};
use crate::types::{
    PipelineOptions, PrinterDescriptor, PrinterStatus, PrinterSummary, TransportResult,
};
use docket_escpos::{
    encode, BarcodeOptions, DocumentBuilder, DrawerPin, PrintJob, QrEcLevel, Symbology, TextStyle,
};
use tracing::{info, instrument};

/// High-level printing front end over one registry
#[derive(Clone)]
pub struct PrintPipeline {
    registry: PrinterRegistry,
    documents: DocumentBuilder,
    options: PipelineOptions,
}

impl Default for PrintPipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl PrintPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            registry: PrinterRegistry::new(),
            documents: DocumentBuilder::new(options.width).with_code_page(options.code_page),
            options,
        }
    }

    pub fn registry(&self) -> &PrinterRegistry {
        &self.registry
    }

    pub fn documents(&self) -> &DocumentBuilder {
        &self.documents
    }

    // === Sending ===

    /// The workhorse: Selection check, send lock, flatten, dispatch
    ///
    /// Sends to the same printer serialize on its lock; different printers
    /// proceed independently.
    #[instrument(skip(self, job), fields(segments = job.len(), bytes = job.byte_len()))]
    pub async fn send_job(&self, job: &PrintJob) -> PrinterResult<TransportResult> {
        let Some(printer) = self.registry.current_selection().await else {
            return Err(PrinterError::NoPrinterSelected);
        };

        let lock = self.registry.send_lock(&printer.name).await;
        let _guard = lock.lock().await;

        let bytes = job.flatten();
        let result =
            transport::dispatch(&printer, &bytes, &TransportConfig::from(&self.options)).await;
        transport::into_error(printer.kind, &result)?;
        info!(printer = %printer.name, bytes = result.bytes_sent, "job delivered");
        Ok(result)
    }

    /// One line of text on the selected printer
    pub async fn print_text(&self, text: &str, bold: bool) -> PrinterResult<TransportResult> {
        let mut job = PrintJob::new();
        job.push(encode::line(text, bold, self.options.code_page)?);
        self.send_job(&job).await
    }

    pub async fn print_banner(
        &self,
        text: &str,
        border: char,
        width: Option<usize>,
    ) -> PrinterResult<TransportResult> {
        let mut job = PrintJob::new();
        job.push(encode::init());
        job.extend(self.documents.banner(text, border, width)?);
        self.send_job(&job).await
    }

    pub async fn print_table(&self, rows: &[Vec<String>]) -> PrinterResult<TransportResult> {
        self.send_job(&self.documents.table(rows)?).await
    }

    pub async fn print_list(
        &self,
        items: &[String],
        bullet: &str,
    ) -> PrinterResult<TransportResult> {
        self.send_job(&self.documents.list(items, bullet)?).await
    }

    pub async fn print_receipt(
        &self,
        lines: &[String],
        footer: Option<&str>,
        cut: bool,
    ) -> PrinterResult<TransportResult> {
        self.send_job(&self.documents.receipt(lines, footer, cut)?).await
    }

    /// Centered barcode with feed-out
    pub async fn print_barcode(
        &self,
        data: &str,
        symbology: Symbology,
        opts: BarcodeOptions,
    ) -> PrinterResult<TransportResult> {
        let mut job = PrintJob::new();
        job.push(encode::init())
            .push(encode::style(TextStyle::AlignCenter))
            .push(encode::barcode(data, symbology, opts)?)
            .push(encode::style(TextStyle::AlignLeft))
            .push(encode::feed(3));
        self.send_job(&job).await
    }

    /// Centered QR code with feed-out
    pub async fn print_qr(
        &self,
        data: &str,
        level: QrEcLevel,
        module_size: u8,
    ) -> PrinterResult<TransportResult> {
        let mut job = PrintJob::new();
        job.push(encode::init())
            .push(encode::style(TextStyle::AlignCenter))
            .push(encode::qr(data, level, module_size)?)
            .push(encode::style(TextStyle::AlignLeft))
            .push(encode::feed(3));
        self.send_job(&job).await
    }

    /// Kick the cash drawer with the default pulse timings
    pub async fn open_cash_drawer(&self, pin: DrawerPin) -> PrinterResult<TransportResult> {
        let mut job = PrintJob::new();
        job.push(encode::drawer_pulse(
            pin,
            encode::DRAWER_ON_MS,
            encode::DRAWER_OFF_MS,
        )?);
        self.send_job(&job).await
    }

    /// Raw bytes, no validation; see [`encode::raw`]
    pub async fn send_raw(&self, bytes: &[u8]) -> PrinterResult<TransportResult> {
        let mut job = PrintJob::new();
        job.push(encode::raw(bytes));
        self.send_job(&job).await
    }

    /// Self-test document naming the selected printer
    pub async fn print_test_page(&self) -> PrinterResult<TransportResult> {
        let Some(printer) = self.registry.current_selection().await else {
            return Err(PrinterError::NoPrinterSelected);
        };
        let job = self.documents.test_page(&printer.name)?;
        self.send_job(&job).await
    }

    // === Status ===

    /// Live status of the named printer, or of the Selection
    pub async fn printer_status(&self, name: Option<&str>) -> PrinterResult<PrinterStatus> {
        let printer = self.resolve(name).await?;
        Ok(transport::dispatch_status(&printer, &TransportConfig::from(&self.options)).await)
    }

    /// Whether the printer would take a job right now
    pub async fn is_ready(&self, name: Option<&str>) -> PrinterResult<bool> {
        Ok(self.printer_status(name).await? == PrinterStatus::Ready)
    }

    async fn resolve(&self, name: Option<&str>) -> PrinterResult<PrinterDescriptor> {
        match name {
            Some(name) => self
                .registry
                .snapshot()
                .await
                .into_iter()
                .find(|p| p.name == name)
                .ok_or_else(|| PrinterError::NotFound(name.to_string())),
            None => self
                .registry
                .current_selection()
                .await
                .ok_or(PrinterError::NoPrinterSelected),
        }
    }

    // === Registry passthroughs ===

    /// Fresh discovery as summaries
    pub async fn list_printers(&self) -> PrinterResult<Vec<PrinterSummary>> {
        Ok(self
            .registry
            .discover()
            .await?
            .iter()
            .map(PrinterDescriptor::summary)
            .collect())
    }

    /// Fresh discovery with full platform metadata
    pub async fn list_printers_detailed(&self) -> PrinterResult<Vec<PrinterDescriptor>> {
        self.registry.discover().await
    }

    /// Fresh discovery filtered to likely thermal hardware
    pub async fn list_thermal_printers(&self) -> PrinterResult<Vec<PrinterSummary>> {
        Ok(self
            .registry
            .discover_thermal()
            .await?
            .iter()
            .map(PrinterDescriptor::summary)
            .collect())
    }

    pub async fn select_printer(&self, name: &str) -> PrinterResult<PrinterSummary> {
        Ok(self.registry.select_by_name(name).await?.summary())
    }

    pub async fn auto_select(&self) -> PrinterResult<PrinterSummary> {
        Ok(self.registry.auto_select().await?.summary())
    }

    pub async fn selected_printer(&self) -> Option<PrinterSummary> {
        self.registry.current_selection().await.map(|p| p.summary())
    }

    pub async fn clear_selection(&self) {
        self.registry.clear_selection().await;
    }

    /// Make an ad-hoc raw printer selectable
    pub async fn register_printer(&self, descriptor: PrinterDescriptor) {
        self.registry.register(descriptor).await;
    }
}
