use crate::prelude::*;

use std::fmt::Write as _;

// Column groupings for the generated dashboard, by slot, matching the
// layout of the Intergas web interface.
static COLUMNS: &[(&str, &[u8])] = &[
    ("xtendsummary", &[1, 2, 3, 47, 49, 48, 51, 50, 9]),
    ("xtendtoday", &[22, 32, 33, 36, 37, 38, 43, 44, 45]),
    ("xtendactual1", &[6, 5, 4, 7, 8, 10, 11, 12, 13]),
    ("xtendactual2", &[14, 15, 23, 24, 27, 30, 26, 31, 55]),
    ("boileractual1", &[34, 35, 39, 40, 52, 46, 41, 42, 53]),
    ("boileractual2", &[16, 17, 18, 19, 28, 29, 20, 21, 25, 54]),
];

/// Writes a default Dashticz CONFIG.js covering every catalog slot.
///
/// The file is a starting template: the Domoticz address still needs to be
/// filled in, and the screen number adjusted if other screens exist.
pub struct Dashboard {
    config: ConfigWrapper,
    catalog: Catalog,
}

impl Dashboard {
    pub fn new(config: ConfigWrapper, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn write(&self) -> Result<()> {
        let dashboard = self.config.dashboard();
        if !dashboard.enabled() {
            info!("dashboard generation disabled, skipping");
            return Ok(());
        }

        info!("writing dashticz config to {}", dashboard.path());

        let content = self.render()?;
        std::fs::write(dashboard.path(), content)
            .map_err(|err| file_error_with_source!(err, "writing {}", dashboard.path()))?;

        Ok(())
    }

    fn render(&self) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "var config = {{}}")?;
        writeln!(
            out,
            "config['language'] = 'en_US'; //or: nl_NL, en_US, de_DE, fr_FR, hu_HU, it_IT, pt_PT, sv_SV"
        )?;
        writeln!(out, "config['domoticz_ip'] = 'http://xxx.xxx.xxx.xxx:port';")?;
        writeln!(out, "config['domoticz_refresh'] = '5';")?;
        writeln!(out, "config['dashticz_refresh'] = '60';")?;

        writeln!(out, "//Definition of blocks")?;
        writeln!(out, "blocks = {{}}")?;
        for field in self.catalog.iter() {
            writeln!(out, "blocks[{}] = {{", self.block_id(field.slot))?;
            writeln!(out, "    last_update:false,")?;
            writeln!(out, "    width: 12")?;
            writeln!(out, "}}")?;
        }

        writeln!(out, "//Definition of columns")?;
        writeln!(out, "columns = {{}}")?;
        for (name, slots) in COLUMNS {
            writeln!(out, "columns[\"{}\"] = {{", name)?;
            let blocks = slots
                .iter()
                .map(|&slot| self.block_id(slot))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(out, "    blocks : [ {}],", blocks)?;
            writeln!(out, "    width: 2")?;
            writeln!(out, "}}")?;
        }

        writeln!(out, "//Definition of screens")?;
        writeln!(out, "screens = {{}}")?;
        writeln!(out, "screens[1] = {{")?;
        let names = COLUMNS
            .iter()
            .map(|(name, _)| format!("\"{}\"", name))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "    columns: [{}]", names)?;
        writeln!(out, "}}")?;

        Ok(out)
    }

    // Accumulating devices get a Dashticz subdevice block, keyed '<slot>_1'.
    fn block_id(&self, slot: u8) -> String {
        let cumulative = self.catalog.iter().any(|field| {
            field.slot == slot
                && matches!(
                    field.class,
                    DeviceClass::Counter | DeviceClass::EnergyPair { .. }
                )
        });

        if cumulative {
            format!("'{}_1'", slot)
        } else {
            slot.to_string()
        }
    }
}
