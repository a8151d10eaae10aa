use super::error::LocalError;
use log::error;
use std::{
    fs::{File, create_dir_all},
    io::Write,
};

/// Write report data to `<directory>/<output_name>.<extension>`, replacing an older file
pub(crate) fn local_output(
    data: &[u8],
    directory: &str,
    output_name: &str,
    extension: &str,
) -> Result<(), LocalError> {
    let result = create_dir_all(directory);
    match result {
        Ok(_) => {}
        Err(err) => {
            error!("[output] Failed to create output directory for {directory}. Error: {err:?}");
            return Err(LocalError::CreateDirectory);
        }
    }

    let file_result = File::create(format!("{directory}/{output_name}.{extension}"));
    let mut report_file = match file_result {
        Ok(results) => results,
        Err(err) => {
            error!("[output] Failed to create output file {output_name} at {directory}. Error: {err:?}");
            return Err(LocalError::CreateFile);
        }
    };

    let write_result = report_file.write_all(data);
    match write_result {
        Ok(_) => {}
        Err(err) => {
            error!("[output] Failed to write output to file {output_name} at {directory}. Error: {err:?}");
            return Err(LocalError::WriteJson);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::local_output;
    use std::{fs::read, path::PathBuf};

    #[test]
    fn test_local_output() {
        let mut directory = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        directory.push("tmp/local_output");
        let directory = directory.display().to_string();

        local_output(b"first", &directory, "test", "json").unwrap();
        local_output(b"second", &directory, "test", "json").unwrap();
        assert_eq!(read(format!("{directory}/test.json")).unwrap(), b"second");
    }
}
