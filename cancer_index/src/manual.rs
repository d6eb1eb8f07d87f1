/*!

This is the long-form manual for `cancer_index` and `wwci`.

## Answer records

A record is the JSON object exported from the survey store for one respondent.
The following sections are read:

* `firmographics_data`, `general_benefits_data`, `current_support_data`
* `dimension1_data` to `dimension13_data`
* `cross_dimensional_data`
* `employee_impact_data` (older exports call it `employee-impact-assessment_data`)

The survey id is read from `survey_id`, `app_id` or `surveyId`, and the company
name from `company_name` or `companyName`.

Each dimension section can contain:

* `d{n}a`: the status grid, a map from element name to status
* `d{n}aa`: how consistently the programs are deployed across locations
* `d{n}b`: additional programs not listed, as free text
* the follow-up questions of the dimension (`d1_4b`, `d3_1`, `d13_1`, ...)

Element names are matched after normalization (case, curly quotes, dashes and
extra whitespace are ignored). Unknown elements and statuses are dropped and
reported as issues: they count neither in the scores nor in the report.
Numeric statuses from spreadsheet imports are accepted:

| code | status                           |
|------|----------------------------------|
| 4    | currently offer / measure / use  |
| 3    | in active planning / development |
| 2    | assessing feasibility            |
| 1    | not able in foreseeable future   |
| 5    | unsure                           |

## Scoring

A dimension score is the share of the dimension's element weight that is
currently offered, from 0 to 100. Elements not answered count as not offered.
A dimension without any valid grid answer has no score (`null`), which is
different from a score of 0.

The weighted score averages the dimensions that have a score, using the
dimension weights:

| dimension | weight | dimension | weight |
|-----------|--------|-----------|--------|
| 1         | 7      | 8         | 13     |
| 2         | 11     | 9         | 4      |
| 3         | 12     | 10        | 4      |
| 4         | 14     | 11        | 3      |
| 5         | 7      | 12        | 3      |
| 6         | 8      | 13        | 10     |
| 7         | 4      |           |        |

The composite score is `90% weighted + 5% maturity + 5% breadth`. The maturity
comes from the support approach (`or1`), the breadth from the support beyond
legal requirements (`cb3a`, `cb3b`, `cb3c`). All roundings are half up.

| composite | tier        |
|-----------|-------------|
| 90+       | Exemplary   |
| 75 to 89  | Leading     |
| 60 to 74  | Progressing |
| 40 to 59  | Emerging    |
| below 40  | Developing  |

A dimension has insufficient data when at least 40% of its answers are
"Unsure". The result is provisional when 4 dimensions or more have
insufficient data.

## Configuration

`wwci` reads a JSON run configuration:

```json
{
  "outputSettings": {
    "reportName": "Spring wave",
    "outputDirectory": "reports",
    "generatedOn": "March 3, 2026"
  },
  "assessmentSources": [
    { "provider": "json", "filePath": "export.json" }
  ],
  "elementWeights": { "provider": "csv", "filePath": "weights.csv" },
  "rules": {
    "statusCredit": "ordinal",
    "geoAdjustment": true,
    "followUpBlend": true,
    "compositeWeights": { "weightedDim": 90, "maturity": 5, "breadth": 5 }
  }
}
```

All the rules are optional:
- `statusCredit`: `offerOnly` (default) gives credit to offered elements only.
 `ordinal` also gives 60% to elements in planning and 40% to elements being assessed.
 `legacyFlat` follows the older PDF export (50% and 25%).
- `geoAdjustment` (default false): dimensions only available in select locations
 are multiplied by 0.75, and by 0.90 when they vary across locations.
- `followUpBlend` (default false): dimensions 1, 3, 12 and 13 blend 85% of the grid
 score with 15% of the score of their follow-up answers.

Element weights can be calibrated from benchmark data. In JSON:

```json
{ "4": [ { "e": "Nutrition coaching", "w": 0.05, "s": 0.31 } ] }
```

or in CSV:

```text
dimension,element,weight,standard_setter
4,Nutrition coaching,0.05,0.31
```

Elements not listed keep their default weight, which is equal for all the
elements of a dimension.

 */
