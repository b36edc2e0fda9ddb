//! View model computation.
//!
//! Turns the current [`AppState`] into a [`UIViewModel`]: windowing the list,
//! rasterizing overlays and markers, and resolving every colour through the
//! theme.

use super::modes::{Focus, InputMode, SearchField};
use super::state::{AppState, LoadState, OverlayState};
use crate::domain::{Record, StatusBucket, ValidityClass};
use crate::infrastructure::strip_host_prefix;
use crate::ui::layout::{list_window, Layout};
use crate::ui::map::{format_readout, Canvas, Viewport, NORTH_INDICATOR, POINTER_HINT};
use crate::ui::sync::ListItem;
use crate::ui::viewmodel::{
    CalloutField, CalloutInfo, CounterInfo, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, LegendItem,
    ListRow, MapInfo, SearchBoxInfo, ToggleInfo, UIViewModel,
};

pub const TITLE: &str = "Pedidos de Licença Ambiental";

/// Digit keys available for overlay toggles; `0` is the marker layer.
const MAX_TOGGLES: usize = 9;

/// Toggle label of the application markers.
pub const MARKER_LAYER: &str = "Pedidos de Licença";

impl AppState {
    /// Computes a renderable UI view model for a `rows` × `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let layout = Layout::compute(rows, cols);

        let mut viewport = self.viewport;
        if viewport.size() != (layout.map.width, layout.map.height) {
            viewport.resize(layout.map.width, layout.map.height);
        }

        UIViewModel {
            layout,
            header: self.compute_header(),
            filters: self.compute_filters(),
            list: self.compute_list(&layout),
            map: self.compute_map(&viewport),
            callout: self.compute_callout(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let counters = self
            .layers
            .counters()
            .map(|(bucket, value)| CounterInfo {
                label: bucket.label().to_string(),
                value,
                color: self.theme.status_color(bucket).to_string(),
            })
            .collect();

        HeaderInfo {
            title: format!(" {TITLE} ({}) ", self.entry_count()),
            counters,
        }
    }

    fn compute_filters(&self) -> FilterBarInfo {
        let editing = |field| self.input_mode == InputMode::Search(field);
        FilterBarInfo {
            status: self.criteria.status.label().to_string(),
            process: SearchBoxInfo {
                label: "Processo".to_string(),
                query: self.criteria.process_query.clone(),
                editing: editing(SearchField::Process),
            },
            enterprise: SearchBoxInfo {
                label: "Empreendimento".to_string(),
                query: self.criteria.enterprise_query.clone(),
                editing: editing(SearchField::Enterprise),
            },
            active: self.criteria.is_active(),
        }
    }

    fn compute_list(&self, layout: &Layout) -> Vec<ListRow> {
        let items = self.layers.list();
        let capacity = layout.list_capacity();
        let start = list_window(self.selected_index, items.len(), capacity);

        items
            .iter()
            .enumerate()
            .skip(start)
            .take(capacity)
            .map(|(idx, item)| match item {
                ListItem::Entry(entry) => ListRow::Entry {
                    title: entry.title.clone(),
                    detail: format!("Processo: {} | Status: {}", entry.process, entry.status),
                    status_color: self.theme.status_color(entry.bucket).to_string(),
                    validity: format!("Validade: {}", entry.validity),
                    validity_color: self.theme.validity_color(entry.validity_class).to_string(),
                    is_selected: idx == self.selected_index,
                },
                ListItem::Placeholder(message) => ListRow::Placeholder(message.clone()),
            })
            .collect()
    }

    fn compute_map(&self, viewport: &Viewport) -> MapInfo {
        let (cols, rows) = viewport.size();
        let mut canvas = Canvas::new(cols, rows);

        let mut overlay_colors = Vec::with_capacity(self.overlays.len());
        for (idx, slot) in self.overlays.iter().enumerate() {
            overlay_colors.push(slot.spec.color.clone());
            if let OverlayState::Loaded(overlay) = &slot.state {
                if overlay.visible {
                    for path in &overlay.paths {
                        canvas.draw_path(viewport, path, idx);
                    }
                }
            }
        }

        let (selected, others): (Vec<_>, Vec<_>) = self
            .layers
            .markers()
            .iter()
            .partition(|marker| Some(marker.feature) == self.callout);
        if self.markers_visible {
            for marker in others {
                canvas.draw_marker(viewport, marker, false);
            }
            for marker in selected {
                canvas.draw_marker(viewport, marker, true);
            }
        }

        let focused = self.focus == Focus::Map;
        let cursor = (
            self.cursor.0.min(cols.saturating_sub(1)),
            self.cursor.1.min(rows.saturating_sub(1)),
        );
        if focused {
            canvas.draw_cursor(cursor.0, cursor.1);
        }

        let readout = if focused && viewport.has_area() {
            format_readout(viewport.point_at(cursor.0, cursor.1))
        } else {
            POINTER_HINT.to_string()
        };

        let legend = StatusBucket::COUNTED
            .into_iter()
            .map(|bucket| LegendItem {
                label: bucket.legend_label().to_string(),
                color: self.theme.status_color(bucket).to_string(),
            })
            .collect();

        let markers = ToggleInfo {
            key: 0,
            name: MARKER_LAYER.to_string(),
            color: self.theme.colors.text_normal.clone(),
            visible: self.markers_visible,
        };
        let toggles = std::iter::once(markers)
            .chain(
                self.toggles()
                    .take(MAX_TOGGLES)
                    .enumerate()
                    .map(|(idx, overlay)| ToggleInfo {
                        key: idx + 1,
                        name: overlay.name.clone(),
                        color: overlay.color.clone(),
                        visible: overlay.visible,
                    }),
            )
            .collect();

        MapInfo {
            canvas,
            overlay_colors,
            readout,
            scale: viewport.scale_bar(),
            north: NORTH_INDICATOR.to_string(),
            legend,
            toggles,
            focused,
        }
    }

    fn compute_callout(&self) -> Option<CalloutInfo> {
        let feature = self.store.get(self.callout?)?;
        let record = &feature.record;

        let field = |label: &str, value: &str| CalloutField {
            label: label.to_string(),
            value: value.to_string(),
            color: None,
        };

        let validity_class = ValidityClass::classify(record.validity.as_deref(), self.today());
        let fields = vec![
            field("Processo", record.process_or_default()),
            field("Tipo", record.kind_or_default()),
            field("Finalidade", record.purpose_or_default()),
            field("Localização", record.location_or_default()),
            CalloutField {
                color: Some(self.theme.status_color(feature.bucket).to_string()),
                ..field("Status", record.status_or_default())
            },
            CalloutField {
                color: Some(self.theme.validity_color(validity_class).to_string()),
                ..field("Validade", record.validity_or_default())
            },
        ];

        Some(CalloutInfo {
            title: record.enterprise_or_default().to_string(),
            fields,
            documents: document_lines(record),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.focus) {
            (InputMode::Search(_), _) => "Digite para filtrar  Tab: outro campo  Enter/Esc: concluir",
            (InputMode::Normal, Focus::List) => {
                "j/k: navegar  Enter: ver no mapa  s/S: status  p/e: buscar  c: limpar  Tab: mapa  q: sair"
            }
            (InputMode::Normal, Focus::Map) => {
                "setas: cursor  HJKL: mover  +/-: zoom  f: ajustar  Enter: detalhes  0-9: camadas  Tab: lista  q: sair"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        (self.load_state == LoadState::Loading).then(|| EmptyState {
            message: "Carregando pedidos de licença...".to_string(),
            subtitle: strip_host_prefix(&self.dataset_path),
        })
    }
}

fn document_lines(record: &Record) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(url) = &record.license_pdf {
        lines.push(format!("Baixar licença (PDF): {url}"));
    }
    if let Some(url) = &record.opinion_pdf {
        lines.push(format!("Baixar Parecer Técnico (PDF): {url}"));
    }
    lines
}
