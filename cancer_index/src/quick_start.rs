/*!

# Quick start

This example scores the answers exported from the survey administration page.

**Getting the answers** In the admin page, export the assessments in JSON. The
export is either one record or an array of records, one per respondent:

```json
[
  {
    "survey_id": "CAC-2026-0042",
    "company_name": "Acme",
    "current_support_data": { "or1": "Moderate support beyond legal requirements" },
    "dimension4_data": {
      "d4a": {
        "Nutrition coaching": "Currently offer",
        "Clinical trial matching service": "Assessing feasibility"
      },
      "d4aa": "Generally consistent across all locations"
    }
  }
]
```

**Running** Run `wwci` on the export:

```bash
wwci --input export.json --out reports
```

This writes one report per respondent in the `reports` directory
(`Cancer_Support_Report_CAC-2026-0042.md`) and prints the scores:

```text
[2026-03-03T09:55:59Z INFO  wwci] CAC-2026-0042 Acme: composite 12 (Developing), 1 dimensions scored
```

Use `--out stdout` to print the reports instead. A single respondent of a batch
export can be selected with `--survey-id`.

**Scores summary** The flag `--summary-csv scores.csv` writes one row per
respondent with the score of each dimension and the composite score. Dimensions
without answers are left empty.

**Checking the results** When reproducing the scores of an earlier run, pass the
summary of that run with `--reference`. `wwci` prints the differences and fails
if the scores changed.

It is the end of this quick start. You can explore the following sections:
- the [manual](../manual/index.html#configuration) documents the `--config` flag
 and the scoring rules.
- the weights of the elements can be calibrated with the `--weights` flag.

*/
